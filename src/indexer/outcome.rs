//! Classification of indexer output.
//!
//! The exit status of the indexer is not trusted. A run failed if and only
//! if its captured output contains `FATAL:` or `ERROR:` (case-sensitive,
//! anywhere in the text).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SphinxSearchError};

/// Markers that turn a run into a failure.
pub const FAILURE_MARKERS: [&str; 2] = ["FATAL:", "ERROR:"];

/// Returns true when `output` carries a failure marker.
pub fn is_failure(output: &str) -> bool {
    FAILURE_MARKERS.iter().any(|marker| output.contains(marker))
}

/// Report of one indexer run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationOutcome {
    pub success: bool,

    /// Captured output, untouched.
    pub raw_output: String,

    /// Present only for failed runs.
    pub error_message: Option<String>,

    pub exit_code: Option<i32>,

    /// The command line that was run.
    pub command: String,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RotationOutcome {
    /// Classify a finished run.
    pub fn classify(
        command: String,
        raw_output: String,
        exit_code: Option<i32>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let success = !is_failure(&raw_output);
        let error_message = if success {
            None
        } else {
            Some(raw_output.trim_end().to_string())
        };

        Self {
            success,
            raw_output,
            error_message,
            exit_code,
            command,
            started_at,
            finished_at,
        }
    }

    /// Turn a failed outcome into an [`SphinxSearchError::Indexing`].
    pub fn into_result(self) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(SphinxSearchError::indexing(&self.raw_output))
        }
    }

    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(output: &str, exit_code: Option<i32>) -> RotationOutcome {
        let now = Utc::now();
        RotationOutcome::classify(
            "indexer --rotate --all".to_string(),
            output.to_string(),
            exit_code,
            now,
            now,
        )
    }

    #[test]
    fn test_markers_anywhere_fail() {
        assert!(is_failure("FATAL: failed to open config"));
        assert!(is_failure("using config file...\nindexing index 'x'...\nERROR: index 'x': sql_connect"));
        assert!(is_failure("prefixERROR:suffix"));
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        assert!(!is_failure("fatal: lower case"));
        assert!(!is_failure("Error: mixed case"));
        assert!(!is_failure("WARNING: attribute count is 0"));
        assert!(!is_failure("FATAL without colon"));
        assert!(!is_failure(""));
    }

    #[test]
    fn test_exit_code_is_ignored() {
        let ok = outcome("total 10 docs\nrotating indices: successfully sent SIGHUP", Some(1));
        assert!(ok.success);
        assert_eq!(ok.error_message, None);

        let failed = outcome("FATAL: no indexes found\n", Some(0));
        assert!(!failed.success);
        assert_eq!(failed.error_message.as_deref(), Some("FATAL: no indexes found"));
        assert_eq!(failed.raw_output, "FATAL: no indexes found\n");
    }

    #[test]
    fn test_into_result() {
        assert!(outcome("done", Some(0)).into_result().is_ok());

        let err = outcome("ERROR: boom\n", Some(0)).into_result().unwrap_err();
        assert_eq!(err.to_string(), "Error rotating indexes: \"ERROR: boom\".");
    }
}
