//! The search-wire client capability.
//!
//! This crate does not speak the daemon protocol itself. A [`SearchClient`]
//! implementation does, and receives the full [`QuerySession`] with every
//! query so that it holds no hidden filter or weight state of its own.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::search::escape::escape_query;
use crate::search::excerpt::ExcerptOptions;
use crate::search::result::QueryResult;
use crate::search::session::QuerySession;

/// Where the daemon listens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerAddress {
    Tcp { host: String, port: u16 },
    Unix(PathBuf),
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerAddress::Tcp { host, port } => write!(f, "{host}:{port}"),
            ServerAddress::Unix(path) => write!(f, "unix://{}", path.display()),
        }
    }
}

/// A query queued for batch execution, with the session it was queued under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub query: String,
    /// Space-separated physical index names.
    pub indexes: String,
    pub session: QuerySession,
}

/// Operations the engine needs from a daemon client.
pub trait SearchClient: Send + fmt::Debug {
    /// Point the client at a daemon.
    fn set_server(&mut self, address: &ServerAddress) -> Result<()>;

    /// Escape query-syntax characters.
    fn escape_string(&self, text: &str) -> String {
        escape_query(text)
    }

    /// Run one query against space-separated physical index names.
    fn query(&mut self, session: &QuerySession, query: &str, indexes: &str)
    -> Result<QueryResult>;

    /// Run a batch in one round-trip. Returns one result per entry, in order.
    fn run_queries(&mut self, batch: &[BatchEntry]) -> Result<Vec<QueryResult>>;

    /// Highlight `words` in each of `docs` using `index`'s text settings.
    fn build_excerpts(
        &mut self,
        docs: &[String],
        index: &str,
        words: &str,
        options: &ExcerptOptions,
    ) -> Result<Vec<String>>;

    /// Message describing the most recent failure, empty if none.
    fn last_error(&self) -> String;
}

impl<C: SearchClient + ?Sized> SearchClient for Box<C> {
    fn set_server(&mut self, address: &ServerAddress) -> Result<()> {
        self.as_mut().set_server(address)
    }

    fn escape_string(&self, text: &str) -> String {
        self.as_ref().escape_string(text)
    }

    fn query(
        &mut self,
        session: &QuerySession,
        query: &str,
        indexes: &str,
    ) -> Result<QueryResult> {
        self.as_mut().query(session, query, indexes)
    }

    fn run_queries(&mut self, batch: &[BatchEntry]) -> Result<Vec<QueryResult>> {
        self.as_mut().run_queries(batch)
    }

    fn build_excerpts(
        &mut self,
        docs: &[String],
        index: &str,
        words: &str,
        options: &ExcerptOptions,
    ) -> Result<Vec<String>> {
        self.as_mut().build_excerpts(docs, index, words, options)
    }

    fn last_error(&self) -> String {
        self.as_ref().last_error()
    }
}
