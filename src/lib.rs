//! # sphinxsearch
//!
//! Index rotation and query composition for the Sphinx full-text search
//! daemon.
//!
//! ## Features
//!
//! - Rebuild and rotate indexes through the external `indexer` executable,
//!   classifying its output for failures
//! - Logical to physical index name mapping from configuration
//! - Filter, weight, limit, sort and geo-anchor session state
//! - Single and batched query execution with status validation
//! - Snippet (excerpt) generation
//!
//! The daemon wire protocol is not implemented here; plug in a
//! [`search::SearchClient`].

pub mod cli;
pub mod config;
pub mod error;
pub mod indexer;
pub mod registry;
pub mod search;

pub mod prelude {
    pub use crate::config::SphinxConfig;
    pub use crate::error::{Result, SphinxSearchError};
    pub use crate::indexer::{Indexer, IndexerCommand, RotationOutcome, RotationRequest};
    pub use crate::registry::IndexRegistry;
    pub use crate::search::{SearchClient, SearchOptions, ServerAddress, SphinxSearch};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
