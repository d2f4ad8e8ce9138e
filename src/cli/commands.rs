//! Command implementations for the sphinxsearch CLI.

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::SphinxConfig;
use crate::error::{Result, SphinxSearchError};
use crate::indexer::{Indexer, ProcessRunner, RotationRequest};

/// Execute a CLI command.
pub fn execute_command(args: SphinxArgs) -> Result<()> {
    let config = SphinxConfig::from_file(&args.config)?;
    let indexer = Indexer::from_config(&config);
    execute_with(&indexer, &args)
}

/// Execute a CLI command against an already built indexer.
pub fn execute_with<R: ProcessRunner>(indexer: &Indexer<R>, args: &SphinxArgs) -> Result<()> {
    match &args.command {
        Command::Rotate(rotate_args) => rotate(indexer, rotate_args.request(), args),
        Command::Indexer(IndexerAction::Rotate(rotate_args)) => {
            indexer_rotate(indexer, rotate_args, args)
        }
        Command::Indexer(IndexerAction::ShowIndexes) => show_indexes(indexer, args),
    }
}

/// Rotate the requested indexes.
fn rotate<R: ProcessRunner>(
    indexer: &Indexer<R>,
    request: RotationRequest,
    cli_args: &SphinxArgs,
) -> Result<()> {
    if cli_args.verbosity() > 0 && matches!(cli_args.output_format, OutputFormat::Human) {
        match &request {
            RotationRequest::All => println!("Start rotate \"all\" indexes"),
            RotationRequest::Indexes(names) => {
                println!("Start rotate \"{}\" index", names.join(", "))
            }
        }
    }

    let outcome = indexer.run_rotation(&request)?;
    if outcome.success {
        output_result("Rotation complete", &outcome, cli_args)?;
    } else if matches!(cli_args.output_format, OutputFormat::Json) {
        output_result("Rotation failed", &outcome, cli_args)?;
    }

    outcome.into_result().map(|_| ())
}

/// Rotate a single configured index, or all of them.
fn indexer_rotate<R: ProcessRunner>(
    indexer: &Indexer<R>,
    args: &IndexerRotateArgs,
    cli_args: &SphinxArgs,
) -> Result<()> {
    let request = RotationRequest::from_argument(&args.index);
    if let RotationRequest::Indexes(_) = &request
        && !indexer.registry().contains_logical(&args.index)
    {
        return Err(SphinxSearchError::invalid_argument(format!(
            "Index \"{}\" not configured",
            args.index
        )));
    }
    rotate(indexer, request, cli_args)
}

/// List configured indexes.
fn show_indexes<R: ProcessRunner>(indexer: &Indexer<R>, cli_args: &SphinxArgs) -> Result<()> {
    let listing = IndexListing {
        indexes: indexer
            .registry()
            .iter()
            .map(|(name, physical)| IndexEntry {
                name: name.to_string(),
                physical: physical.to_string(),
            })
            .collect(),
    };

    output_result("Indexes", &listing, cli_args)
}
