//! Configuration for the indexer, the index mapping and the search daemon.
//!
//! The configuration is a JSON document with three sections:
//!
//! ```json
//! {
//!   "indexer": { "sudo": false, "bin": "/usr/bin/indexer", "config": "/etc/sphinx.conf" },
//!   "indexes": { "Threads": "thread_idx", "Posts": "post_idx" },
//!   "searchd": { "host": "localhost", "port": 9312 }
//! }
//! ```
//!
//! Only `indexes` is required and it must hold at least one entry.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SphinxSearchError};
use crate::registry::IndexRegistry;
use crate::search::client::ServerAddress;

/// Default path of the indexer executable.
pub const DEFAULT_INDEXER_BIN: &str = "/usr/bin/indexer";

/// Default daemon host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default daemon port.
pub const DEFAULT_PORT: u16 = 9312;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SphinxConfig {
    /// Indexer executable settings.
    #[serde(default)]
    pub indexer: IndexerConfig,

    /// Logical to physical index mapping.
    pub indexes: IndexRegistry,

    /// Search daemon connection settings.
    #[serde(default)]
    pub searchd: SearchdConfig,
}

/// How to invoke the external indexer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Prefix the command with `sudo`.
    pub sudo: bool,

    /// Path to the indexer executable.
    pub bin: String,

    /// Path to the sphinx configuration file passed as `--config`.
    pub config: Option<String>,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            sudo: false,
            bin: DEFAULT_INDEXER_BIN.to_string(),
            config: None,
        }
    }
}

/// Where the search daemon listens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchdConfig {
    pub host: String,

    #[serde(deserialize_with = "deserialize_port")]
    pub port: u16,

    /// UNIX socket path; takes precedence over host and port.
    pub socket: Option<PathBuf>,
}

impl Default for SearchdConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            socket: None,
        }
    }
}

impl SearchdConfig {
    /// The address a client should connect to.
    pub fn address(&self) -> ServerAddress {
        match &self.socket {
            Some(socket) => ServerAddress::Unix(socket.clone()),
            None => ServerAddress::Tcp {
                host: self.host.clone(),
                port: self.port,
            },
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortValue {
    Number(u16),
    Text(String),
}

// Ports are often written as strings in hand-edited configs.
fn deserialize_port<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<u16, D::Error> {
    match PortValue::deserialize(deserializer)? {
        PortValue::Number(port) => Ok(port),
        PortValue::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid port \"{text}\""))),
    }
}

impl SphinxConfig {
    /// Build a configuration with default indexer and daemon settings.
    pub fn new(indexes: IndexRegistry) -> Result<Self> {
        let config = Self {
            indexer: IndexerConfig::default(),
            indexes,
            searchd: SearchdConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SphinxConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading configuration from {}", path.display());
        let contents = fs::read_to_string(path).map_err(|e| {
            SphinxSearchError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&contents)
    }

    /// Check the invariants serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.indexes.is_empty() {
            return Err(SphinxSearchError::config(
                "\"indexes\" must contain at least one entry",
            ));
        }
        if self.indexer.bin.trim().is_empty() {
            return Err(SphinxSearchError::config("\"indexer.bin\" must not be empty"));
        }
        Ok(())
    }
}
