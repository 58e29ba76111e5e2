use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (registry error, network error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for dependency graph resolution.
///
/// The first four variants are the resolution taxonomy. The graph generator
/// turns any of them into a node's `error` text, so they only surface as
/// `Err` values outside of per-node resolution (CLI, config, manifest I/O).
#[derive(Debug, Error)]
pub enum DepGraphError {
    #[error("Package not found in registry: {package}\n\n💡 Hint: Check the spelling of the package name")]
    NotFound { package: String },

    #[error("No matching versions found for {package}: {}", required.join(", "))]
    NoMatchingVersion {
        package: String,
        required: Vec<String>,
    },

    #[error("Could not load package metadata for {package}\nDetails: {details}\n\n💡 Hint: Please check your internet connection and registry URL")]
    MetadataFetch { package: String, details: String },

    #[error("Illegal state: {details}")]
    IllegalState { details: String },

    #[error("Invalid package name: {name}\nReason: {reason}")]
    InvalidPackageName { name: String, reason: String },

    #[error("Invalid package manifest: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file is a valid package.json with a \"name\" field")]
    InvalidManifest { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for builder patterns and configuration
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

impl DepGraphError {
    /// Short, single-line text used for a node's popup error.
    ///
    /// The full `Display` output carries hints meant for the terminal; a
    /// node only needs the first line.
    pub fn node_message(&self) -> String {
        let full = self.to_string();
        full.lines().next().unwrap_or_default().to_string()
    }
}
