//! Index rotation.
//!
//! [`Indexer`] builds a command line for the external indexer executable,
//! runs it to completion and classifies what it printed. The atomic swap of
//! the rebuilt index into serving position is done by the indexer itself.
//!
//! # Example
//!
//! ```no_run
//! use sphinxsearch::indexer::{Indexer, IndexerCommand};
//! use sphinxsearch::registry::IndexRegistry;
//!
//! # fn main() -> sphinxsearch::error::Result<()> {
//! let registry = IndexRegistry::new([("Threads", "thread_idx")]);
//! let indexer = Indexer::new(IndexerCommand::new("/usr/bin/indexer", false, None), registry);
//!
//! indexer.rotate("Threads")?;
//! indexer.rotate_all()?;
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod outcome;
pub mod runner;

use chrono::Utc;
use serde_json::Value;

use crate::config::SphinxConfig;
use crate::error::{Result, SphinxSearchError};
use crate::registry::IndexRegistry;

pub use command::{CommandLine, IndexerCommand};
pub use outcome::{RotationOutcome, is_failure};
pub use runner::{ProcessOutput, ProcessRunner, SystemProcessRunner};

/// What to rotate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotationRequest {
    /// Every index the indexer knows about (`--all`).
    All,
    /// The given logical names. Unknown names are skipped.
    Indexes(Vec<String>),
}

impl RotationRequest {
    /// Interpret a command-line argument, where both `all` and `--all`
    /// select every index.
    pub fn from_argument(arg: &str) -> Self {
        match arg {
            "all" | "--all" => RotationRequest::All,
            name => RotationRequest::Indexes(vec![name.to_string()]),
        }
    }
}

impl From<&str> for RotationRequest {
    fn from(name: &str) -> Self {
        RotationRequest::Indexes(vec![name.to_string()])
    }
}

impl From<String> for RotationRequest {
    fn from(name: String) -> Self {
        RotationRequest::Indexes(vec![name])
    }
}

impl From<Vec<String>> for RotationRequest {
    fn from(names: Vec<String>) -> Self {
        RotationRequest::Indexes(names)
    }
}

impl From<&[&str]> for RotationRequest {
    fn from(names: &[&str]) -> Self {
        RotationRequest::Indexes(names.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for RotationRequest {
    fn from(names: [&str; N]) -> Self {
        RotationRequest::Indexes(names.iter().map(|s| s.to_string()).collect())
    }
}

impl TryFrom<&Value> for RotationRequest {
    type Error = SphinxSearchError;

    /// Accepts a string or an array. Array elements that are not strings
    /// are dropped like unknown names.
    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::String(name) => Ok(RotationRequest::from(name.as_str())),
            Value::Array(items) => Ok(RotationRequest::Indexes(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect(),
            )),
            other => Err(SphinxSearchError::invalid_argument(format!(
                "Indexes can only be an array or string, {} given.",
                json_type_name(other)
            ))),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "double",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Rebuilds and rotates indexes through the external indexer.
#[derive(Debug, Clone)]
pub struct Indexer<R: ProcessRunner = SystemProcessRunner> {
    command: IndexerCommand,
    registry: IndexRegistry,
    runner: R,
}

impl Indexer<SystemProcessRunner> {
    pub fn new(command: IndexerCommand, registry: IndexRegistry) -> Self {
        Self::with_runner(command, registry, SystemProcessRunner)
    }

    pub fn from_config(config: &SphinxConfig) -> Self {
        Self::new(
            IndexerCommand::from_config(&config.indexer),
            config.indexes.clone(),
        )
    }
}

impl<R: ProcessRunner> Indexer<R> {
    pub fn with_runner(command: IndexerCommand, registry: IndexRegistry, runner: R) -> Self {
        Self {
            command,
            registry,
            runner,
        }
    }

    /// Rebuild and rotate every index.
    pub fn rotate_all(&self) -> Result<RotationOutcome> {
        self.run_rotation(&RotationRequest::All)?.into_result()
    }

    /// Rebuild and rotate the given index or indexes.
    ///
    /// Logical names missing from the registry are skipped. If none
    /// resolve, the indexer is still run with no index arguments.
    pub fn rotate<T: Into<RotationRequest>>(&self, indexes: T) -> Result<RotationOutcome> {
        self.run_rotation(&indexes.into())?.into_result()
    }

    /// Like [`Indexer::rotate`], for loosely typed input. Anything but a
    /// string or an array fails before a process is spawned.
    pub fn rotate_value(&self, indexes: &Value) -> Result<RotationOutcome> {
        let request = RotationRequest::try_from(indexes)?;
        self.rotate(request)
    }

    /// Build the command line a request would run.
    pub fn command_for(&self, request: &RotationRequest) -> CommandLine {
        match request {
            RotationRequest::All => self.command.rotate_all(),
            RotationRequest::Indexes(names) => {
                let resolution = self.registry.resolve_all(names);
                if resolution.is_empty() {
                    log::warn!("No configured index matched {names:?}; running indexer without index arguments");
                }
                self.command.rotate(resolution.names)
            }
        }
    }

    /// Run a rotation and report the outcome without raising on failure
    /// markers. Spawn errors are still returned.
    pub fn run_rotation(&self, request: &RotationRequest) -> Result<RotationOutcome> {
        let command_line = self.command_for(request);
        log::info!("Running {command_line}");

        let started_at = Utc::now();
        let output = self.runner.run(command_line.argv())?;
        let finished_at = Utc::now();

        let outcome = RotationOutcome::classify(
            command_line.to_string(),
            output.combined_output,
            output.exit_code,
            started_at,
            finished_at,
        );

        if outcome.success {
            log::info!("Rotation finished in {}ms", outcome.duration_ms());
        } else {
            log::debug!("Indexer reported failure: {}", outcome.raw_output.trim_end());
        }

        Ok(outcome)
    }

    /// Whether `index` is one of the configured index identifiers.
    ///
    /// This tests physical names. Use `registry().contains_logical` to test
    /// the logical names accepted by `rotate`.
    pub fn check_index(&self, index: &str) -> bool {
        self.registry.contains_physical(index)
    }

    /// Logical index names in configuration order.
    pub fn indexes(&self) -> Vec<String> {
        self.registry.logical_names()
    }

    pub fn registry(&self) -> &IndexRegistry {
        &self.registry
    }

    pub fn command(&self) -> &IndexerCommand {
        &self.command
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }
}
