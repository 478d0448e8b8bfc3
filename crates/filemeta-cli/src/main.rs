//! Filemeta CLI - Main entry point

use clap::Parser;
use filemeta_cli::commands::inventory;
use filemeta_cli::Cli;
use filemeta_common::logging::{init_logging, LogConfig, LogLevel};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Info })
        .log_file_prefix("filemeta")
        .build();

    // Environment variables take precedence
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The run does not depend on logging being available
    let _ = init_logging(&log_config);

    if let Err(e) = inventory::run(&cli).await {
        error!(error = %e, "Inventory failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
