//! Filemeta CLI Library
//!
//! Inventories sequencing-run files on local and remote hosts and writes a
//! tab-separated report with the sample metadata derived from each path.
//!
//! # Overview
//!
//! - **Configuration**: hosts and their scan roots (`config.yaml`)
//! - **Resolution**: local walk or ssh session per host
//! - **Listing**: `walkdir` locally, `find` remotely
//! - **Aggregation**: classify every path with `filemeta_common::classify`
//! - **Report**: TSV written atomically once the run is complete

pub mod aggregate;
pub mod commands;
pub mod config;
pub mod error;
pub mod lister;
pub mod report;
pub mod resolver;
pub mod session;

// Re-export commonly used types
pub use config::{HostEntry, HostsConfig};
pub use error::{CliError, Result};
pub use report::FilemetaTable;

use clap::Parser;
use std::path::PathBuf;

/// Filemeta - sequencing file inventory
#[derive(Parser, Debug)]
#[command(name = "filemeta")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Local paths to parse. Config ignored then.
    #[arg(short, long, num_args = 1..)]
    pub paths: Vec<String>,

    /// Specified file extensions to parse (only with --paths)
    #[arg(short, long, num_args = 1..)]
    pub exts: Vec<String>,

    /// Output report path
    #[arg(short, long, default_value = report::DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Host configuration file (defaults to config.yaml next to the executable)
    #[arg(short, long, env = "FILEMETA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Configuration for this run: explicit paths win over the config file
    pub fn hosts_config(&self) -> Result<HostsConfig> {
        if !self.paths.is_empty() {
            return Ok(HostsConfig::local(self.paths.clone(), self.exts.clone()));
        }

        let path = self.config.clone().unwrap_or_else(config::default_config_path);
        tracing::debug!(config = %path.display(), "Loading host configuration");
        HostsConfig::load(path)
    }
}
