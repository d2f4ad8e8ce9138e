//! Error types for the sphinxsearch library.
//!
//! All fallible operations return [`SphinxSearchError`]. The three
//! domain failures are:
//!
//! - [`SphinxSearchError::InvalidArgument`]: a call was malformed and nothing
//!   external was touched.
//! - [`SphinxSearchError::Indexing`]: the indexer ran to completion but its
//!   output carried a `FATAL:` or `ERROR:` marker.
//! - [`SphinxSearchError::Search`]: the daemon answered a query with a status
//!   other than OK.
//!
//! # Examples
//!
//! ```
//! use sphinxsearch::error::{Result, SphinxSearchError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SphinxSearchError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for sphinxsearch operations.
#[derive(Error, Debug)]
pub enum SphinxSearchError {
    /// Malformed call shape, raised before any external effect.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The indexer output matched a fatal/error marker.
    #[error("{0}")]
    Indexing(String),

    /// The daemon reported a non-OK status for a query.
    #[error("Searching index \"{index}\" for \"{query}\" failed with error \"{message}\".")]
    Search {
        index: String,
        query: String,
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors (process spawn, config file reads)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure inside a search-wire client implementation
    #[error("Transport error: {0}")]
    Transport(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SphinxSearchError.
pub type Result<T> = std::result::Result<T, SphinxSearchError>;

impl SphinxSearchError {
    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SphinxSearchError::InvalidArgument(msg.into())
    }

    /// Create an indexing error from the captured indexer output.
    pub fn indexing<S: AsRef<str>>(output: S) -> Self {
        SphinxSearchError::Indexing(format!(
            "Error rotating indexes: \"{}\".",
            output.as_ref().trim_end()
        ))
    }

    /// Create a new search error.
    pub fn search<I, Q, M>(index: I, query: Q, message: M) -> Self
    where
        I: Into<String>,
        Q: Into<String>,
        M: Into<String>,
    {
        SphinxSearchError::Search {
            index: index.into(),
            query: query.into(),
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SphinxSearchError::Config(msg.into())
    }

    /// Whether this error came from a failed rotation.
    pub fn is_indexing(&self) -> bool {
        matches!(self, SphinxSearchError::Indexing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = SphinxSearchError::invalid_argument("bad shape");
        assert_eq!(error.to_string(), "Invalid argument: bad shape");

        let error = SphinxSearchError::config("missing indexes");
        assert_eq!(error.to_string(), "Configuration error: missing indexes");
    }

    #[test]
    fn test_indexing_error_trims_trailing_whitespace() {
        let error = SphinxSearchError::indexing("FATAL: no such index\n\n");
        assert_eq!(
            error.to_string(),
            "Error rotating indexes: \"FATAL: no such index\"."
        );
        assert!(error.is_indexing());
    }

    #[test]
    fn test_search_error_message() {
        let error = SphinxSearchError::search("Threads", "hello", "connection timed out");
        assert_eq!(
            error.to_string(),
            "Searching index \"Threads\" for \"hello\" failed with error \"connection timed out\"."
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "indexer not found");
        let error = SphinxSearchError::from(io_error);

        match error {
            SphinxSearchError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
