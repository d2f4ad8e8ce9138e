//! Command line argument parsing for the sphinxsearch CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::indexer::RotationRequest;

/// sphinxsearch - rotate Sphinx indexes and inspect the index mapping
#[derive(Parser, Debug, Clone)]
#[command(name = "sphinxsearch")]
#[command(about = "Rotate Sphinx search indexes")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SphinxArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (JSON)
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "SPHINXSEARCH_CONFIG",
        default_value = "sphinxsearch.json",
        global = true
    )]
    pub config: PathBuf,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SphinxArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Rebuild and rotate indexes
    Rotate(RotateArgs),

    /// Indexer maintenance commands
    #[command(subcommand)]
    Indexer(IndexerAction),
}

/// Arguments for rotating one or more indexes
#[derive(Parser, Debug, Clone)]
pub struct RotateArgs {
    /// Logical index names to rotate
    #[arg(value_name = "INDEX", required_unless_present = "all")]
    pub indexes: Vec<String>,

    /// Rotate every index
    #[arg(long, conflicts_with = "indexes")]
    pub all: bool,
}

impl RotateArgs {
    pub fn request(&self) -> RotationRequest {
        if self.all {
            RotationRequest::All
        } else {
            RotationRequest::Indexes(self.indexes.clone())
        }
    }
}

/// Indexer subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum IndexerAction {
    /// Rotate one configured index, or "all"
    Rotate(IndexerRotateArgs),

    /// Show configured indexes
    #[command(name = "show-indexes")]
    ShowIndexes,
}

#[derive(Parser, Debug, Clone)]
pub struct IndexerRotateArgs {
    /// Index to rotate ("all" for all)
    #[arg(value_name = "INDEX")]
    pub index: String,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
