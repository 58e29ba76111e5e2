//! Configuration file support for depgraph.
//!
//! Provides YAML-based configuration through `depgraph.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::shared::security::{read_regular_file, MAX_MANIFEST_SIZE};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "depgraph.config.yml";

/// Upper bound for `max_retries`
const MAX_RETRIES_LIMIT: u32 = 10;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub registry_url: Option<String>,
    pub website_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub format: Option<String>,
    pub filter: Option<String>,
    pub resolve_all: Option<bool>,
    pub depth: Option<usize>,
    pub node_modules: Option<PathBuf>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_regular_file(path, "config file", MAX_MANIFEST_SIZE).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn validate_url(field: &str, value: &Option<String>) -> Result<()> {
    if let Some(url) = value {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!(
                "Invalid config: {} must start with http:// or https:// (got '{}').\n\n\
                 💡 Hint: Use a full URL such as \"https://registry.npmjs.org\".",
                field,
                url
            );
        }
    }
    Ok(())
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    validate_url("registry_url", &config.registry_url)?;
    validate_url("website_url", &config.website_url)?;

    if config.timeout_secs == Some(0) {
        bail!(
            "Invalid config: timeout_secs must be greater than 0.\n\n\
             💡 Hint: The default request timeout is 10 seconds."
        );
    }

    if let Some(retries) = config.max_retries {
        if retries == 0 || retries > MAX_RETRIES_LIMIT {
            bail!(
                "Invalid config: max_retries must be between 1 and {} (got {}).",
                MAX_RETRIES_LIMIT,
                retries
            );
        }
    }

    if config.depth == Some(0) {
        bail!(
            "Invalid config: depth must be greater than 0.\n\n\
             💡 Hint: Use resolve_all: true to resolve the whole graph."
        );
    }

    if let Some(format) = &config.format {
        format
            .parse::<crate::application::dto::OutputFormat>()
            .map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?;
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        warn!(field = %key, "unknown config field ignored");
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
