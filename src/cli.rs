use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::adapters::outbound::network::DEFAULT_REGISTRY_URL;
use crate::application::dto::{GraphRequest, OutputFormat, PackageSpec, ResolveMode};
use crate::config::ConfigFile;
use crate::graph_resolution::services::DEFAULT_WEBSITE_URL;
use crate::shared::error::DepGraphError;
use crate::shared::Result;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_SEARCH_SIZE: usize = 12;

fn parse_depth(s: &str) -> std::result::Result<usize, String> {
    let depth: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if depth == 0 {
        return Err("depth must be greater than 0 (use --all to resolve everything)".to_string());
    }
    Ok(depth)
}

/// Explore the dependency graph of npm packages
#[derive(Parser, Debug)]
#[command(name = "depgraph")]
#[command(version)]
#[command(
    about = "Explore the dependency graph of npm packages",
    long_about = None,
    args_conflicts_with_subcommands = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Package to explore: `name` or `name@range` (e.g. react@^16.0.0)
    pub package: Option<PackageSpec>,

    /// package.json (or its directory) whose dependencies seed the graph
    #[arg(short, long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Prefer packages installed in node_modules above PATH over the registry
    #[arg(long, value_name = "PATH")]
    pub node_modules: Option<PathBuf>,

    /// Number of resolution waves (default: 1, the seeds only)
    #[arg(short, long, value_parser = parse_depth, conflicts_with = "all")]
    pub depth: Option<usize>,

    /// Resolve until no unresolved package remains
    #[arg(short, long)]
    pub all: bool,

    /// Name filter: "text" contains, " text" prefix, "text " suffix, " text " exact
    #[arg(long, allow_hyphen_values = true)]
    pub filter: Option<String>,

    /// Output format: json or markdown
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Registry base URL (default: https://registry.npmjs.org)
    #[arg(long, value_name = "URL")]
    pub registry: Option<String>,

    /// Config file (default: ./depgraph.config.yml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search the registry for packages
    Search {
        /// Search text
        text: String,

        /// Maximum number of results
        #[arg(long, default_value_t = DEFAULT_SEARCH_SIZE)]
        size: usize,
    },
}

/// Settings after merging command line, config file and defaults
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub request: GraphRequest,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub registry_url: String,
    pub website_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
    pub node_modules: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Merges the arguments with an optional config file
    ///
    /// Command line values win over the config file, which wins over the
    /// built-in defaults.
    pub fn resolve(&self, config: Option<&ConfigFile>) -> Result<RunOptions> {
        let empty = ConfigFile::default();
        let config = config.unwrap_or(&empty);

        let resolve_mode = if self.all {
            ResolveMode::All
        } else if let Some(depth) = self.depth {
            ResolveMode::Depth(depth)
        } else if config.resolve_all == Some(true) {
            ResolveMode::All
        } else {
            ResolveMode::Depth(config.depth.unwrap_or(1))
        };

        let format = match (&self.format, &config.format) {
            (Some(format), _) => *format,
            (None, Some(text)) => text
                .parse()
                .map_err(|message| DepGraphError::Validation { message })?,
            (None, None) => OutputFormat::Json,
        };

        let registry_url = self
            .registry
            .clone()
            .or_else(|| config.registry_url.clone())
            .unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string());
        if !(registry_url.starts_with("http://") || registry_url.starts_with("https://")) {
            return Err(DepGraphError::Validation {
                message: format!(
                    "Registry URL must start with http:// or https:// (got '{}')",
                    registry_url
                ),
            }
            .into());
        }

        Ok(RunOptions {
            request: GraphRequest::new(
                self.package.clone(),
                self.manifest.clone(),
                resolve_mode,
                self.filter.clone().or_else(|| config.filter.clone()),
            ),
            format,
            output: self.output.clone(),
            registry_url,
            website_url: config
                .website_url
                .clone()
                .unwrap_or_else(|| DEFAULT_WEBSITE_URL.to_string()),
            timeout: Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            max_retries: config.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            node_modules: self
                .node_modules
                .clone()
                .or_else(|| config.node_modules.clone()),
        })
    }
}
