//! CLI interface for gen-index: argument parsing and the async entrypoint.
//!
//! Keep all non-trivial business logic inside `gen-index-core`; this module
//! is strictly argument exposure and orchestration. [`run`] is separate
//! from `main` so integration tests can invoke it programmatically.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::load_config::load_config;

/// CLI for gen-index: generate barrel index files for configured directories.
#[derive(Parser)]
#[clap(
    name = "gen-index",
    version,
    about = "Scan directories and write index files re-exporting every discovered module"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate index files for every directory in the given config file
    Gen {
        /// Path to the YAML config file
        #[clap(long, default_value = "gi.yaml")]
        config: PathBuf,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main().
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Gen { config } => {
            let raw = load_config(&config)?;
            tracing::info!(command = "gen", "starting index generation");
            gen_index_core::generate(raw).await?;
            tracing::info!(command = "gen", "index generation complete");
            Ok(())
        }
    }
}
