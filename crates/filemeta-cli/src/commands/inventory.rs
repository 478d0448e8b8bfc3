//! `filemeta` inventory run
//!
//! Resolves every host, lists its files, classifies the paths and writes the
//! report. Nothing is written when no files were found.

use crate::aggregate::parse_filemeta;
use crate::error::Result;
use crate::resolver::{HostResolver, SystemHostResolver};
use crate::Cli;
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Report written with this many rows
    Exported { path: PathBuf, rows: usize },
    /// No files matched; no report was written
    NothingFound,
}

/// Run the inventory for the parsed command line
pub async fn run(cli: &Cli) -> Result<Outcome> {
    let resolver = SystemHostResolver::from_system();
    run_with_resolver(cli, &resolver).await
}

/// Run the inventory with a caller-supplied host resolver
pub async fn run_with_resolver(cli: &Cli, resolver: &dyn HostResolver) -> Result<Outcome> {
    let config = cli.hosts_config()?;
    let table = parse_filemeta(&config, resolver).await?;

    if table.is_empty() {
        println!("No files found to export");
        return Ok(Outcome::NothingFound);
    }

    table.export(&cli.output)?;
    info!(output = %cli.output.display(), rows = table.len(), "Report written");
    println!(
        "{} Exported {} record(s) to \"{}\".",
        "✓".green(),
        table.len(),
        cli.output.display()
    );

    Ok(Outcome::Exported {
        path: cli.output.clone(),
        rows: table.len(),
    })
}
