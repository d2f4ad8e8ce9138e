//! Snippet (excerpt) generation options.

use serde::{Deserialize, Serialize};

/// Options for highlighting query terms in document text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcerptOptions {
    /// Inserted before each matched keyword.
    pub before_match: String,
    /// Inserted after each matched keyword.
    pub after_match: String,
    /// Inserted between passages.
    pub chunk_separator: String,
    /// Maximum snippet size in characters.
    pub limit: u32,
    /// Words kept around each match.
    pub around: u32,
    /// Highlight only exact phrase matches.
    pub exact_phrase: bool,
    /// Return only the best passage.
    pub single_passage: bool,
    /// Return the whole text when it fits in `limit`.
    pub use_boundaries: bool,
    pub weight_order: bool,
    pub query_mode: bool,
    pub force_all_words: bool,
}

impl Default for ExcerptOptions {
    fn default() -> Self {
        Self {
            before_match: "<b>".to_string(),
            after_match: "</b>".to_string(),
            chunk_separator: " ... ".to_string(),
            limit: 256,
            around: 5,
            exact_phrase: false,
            single_passage: false,
            use_boundaries: false,
            weight_order: false,
            query_mode: false,
            force_all_words: false,
        }
    }
}

impl ExcerptOptions {
    /// Set the markers wrapped around each matched keyword.
    pub fn with_markers<B: Into<String>, A: Into<String>>(mut self, before: B, after: A) -> Self {
        self.before_match = before.into();
        self.after_match = after.into();
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_around(mut self, around: u32) -> Self {
        self.around = around;
        self
    }

    pub fn with_single_passage(mut self, single_passage: bool) -> Self {
        self.single_passage = single_passage;
        self
    }
}
