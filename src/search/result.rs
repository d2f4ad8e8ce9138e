//! Query results as returned by the daemon.
//!
//! Only [`QueryResult::status`] is interpreted by this crate; the rest is
//! passed through to the caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Status codes of a daemon response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    #[default]
    Ok,
    Error,
    Retry,
    Warning,
}

impl SearchStatus {
    pub fn code(self) -> u32 {
        match self {
            SearchStatus::Ok => 0,
            SearchStatus::Error => 1,
            SearchStatus::Retry => 2,
            SearchStatus::Warning => 3,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(SearchStatus::Ok),
            1 => Some(SearchStatus::Error),
            2 => Some(SearchStatus::Retry),
            3 => Some(SearchStatus::Warning),
            _ => None,
        }
    }

    pub fn is_ok(self) -> bool {
        self == SearchStatus::Ok
    }
}

/// A matched document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Match {
    pub id: u64,
    pub weight: u64,
    #[serde(default)]
    pub attrs: BTreeMap<String, serde_json::Value>,
}

/// Per-keyword statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WordStats {
    pub docs: u64,
    pub hits: u64,
}

/// One daemon response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryResult {
    pub status: SearchStatus,
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub warning: String,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_found: u64,
    /// Query time in seconds, as reported by the daemon.
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub words: BTreeMap<String, WordStats>,
}

impl QueryResult {
    /// The result returned when no index resolved.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when there are no matches.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn with_status(status: SearchStatus) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    pub fn ids(&self) -> Vec<u64> {
        self.matches.iter().map(|m| m.id).collect()
    }
}
