//! Process runner capability.
//!
//! Rotation only needs "run this argv to completion and give me what it
//! printed". Keeping that behind a trait lets tests substitute a scripted
//! runner for the real indexer binary.

use std::process::{Command, Stdio};

use crate::error::{Result, SphinxSearchError};

/// Everything a finished process left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// stdout followed by stderr.
    pub combined_output: String,

    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
}

impl ProcessOutput {
    pub fn new<S: Into<String>>(combined_output: S, exit_code: Option<i32>) -> Self {
        Self {
            combined_output: combined_output.into(),
            exit_code,
        }
    }
}

/// Runs an external command synchronously.
pub trait ProcessRunner: Send + Sync + std::fmt::Debug {
    /// Spawn `argv[0]` with the remaining arguments, wait for it to exit and
    /// capture its output. The child inherits the parent's environment.
    fn run(&self, argv: &[String]) -> Result<ProcessOutput>;
}

/// Runner backed by [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, argv: &[String]) -> Result<ProcessOutput> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| SphinxSearchError::invalid_argument("empty command line"))?;

        // `output()` waits for exit and reaps the child on every path.
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        let mut combined_output = String::from_utf8_lossy(&output.stdout).into_owned();
        combined_output.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(ProcessOutput {
            combined_output,
            exit_code: output.status.code(),
        })
    }
}
