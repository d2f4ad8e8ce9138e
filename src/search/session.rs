//! Query session state.
//!
//! Everything a query is shaped by lives here, owned by the caller through
//! [`SphinxSearch`](crate::search::SphinxSearch), and is handed to the
//! client on every execution.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Full-text matching modes understood by the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Match all query words.
    #[default]
    All,
    /// Match any of the query words.
    Any,
    /// Match the query as a phrase.
    Phrase,
    /// Boolean query syntax.
    Boolean,
    /// Extended query syntax.
    Extended,
    /// Full scan, the query string is ignored.
    Fullscan,
    /// Extended query syntax, second revision.
    Extended2,
}

impl MatchMode {
    /// The daemon's numeric code.
    pub fn code(self) -> u32 {
        match self {
            MatchMode::All => 0,
            MatchMode::Any => 1,
            MatchMode::Phrase => 2,
            MatchMode::Boolean => 3,
            MatchMode::Extended => 4,
            MatchMode::Fullscan => 5,
            MatchMode::Extended2 => 6,
        }
    }
}

/// Result ordering modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    Relevance,
    AttrDesc,
    AttrAsc,
    TimeSegments,
    Extended,
    Expr,
}

impl SortMode {
    pub fn code(self) -> u32 {
        match self {
            SortMode::Relevance => 0,
            SortMode::AttrDesc => 1,
            SortMode::AttrAsc => 2,
            SortMode::TimeSegments => 3,
            SortMode::Extended => 4,
            SortMode::Expr => 5,
        }
    }
}

/// Sort mode plus the attribute or clause it sorts by.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub mode: SortMode,
    pub sort_by: String,
}

/// Offset and count of returned matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    pub offset: u32,
    pub limit: u32,
    /// Maximum matches the daemon keeps in memory; 0 keeps the server default.
    pub max_matches: u32,
    /// Stop after this many matches; 0 disables.
    pub cutoff: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 20,
            max_matches: 1000,
            cutoff: 0,
        }
    }
}

impl Limits {
    pub fn new(offset: u32, limit: u32) -> Self {
        Self {
            offset,
            limit,
            ..Default::default()
        }
    }
}

/// An attribute filter. Filters are ANDed together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Filter {
    /// Attribute must (or must not) equal one of `values`.
    Values {
        attribute: String,
        values: Vec<i64>,
        exclude: bool,
    },
    /// Attribute must (or must not) lie in `min..=max`.
    Range {
        attribute: String,
        min: i64,
        max: i64,
        exclude: bool,
    },
    /// Float attribute must (or must not) lie in `min..=max`.
    FloatRange {
        attribute: String,
        min: f32,
        max: f32,
        exclude: bool,
    },
}

impl Filter {
    pub fn attribute(&self) -> &str {
        match self {
            Filter::Values { attribute, .. }
            | Filter::Range { attribute, .. }
            | Filter::FloatRange { attribute, .. } => attribute,
        }
    }

    pub fn is_exclude(&self) -> bool {
        match self {
            Filter::Values { exclude, .. }
            | Filter::Range { exclude, .. }
            | Filter::FloatRange { exclude, .. } => *exclude,
        }
    }
}

/// Anchor point for geodistance calculations. Coordinates are in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoAnchor {
    pub lat_attr: String,
    pub long_attr: String,
    pub lat: f32,
    pub long: f32,
}

/// Grouping functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupFunc {
    Day,
    Week,
    Month,
    Year,
    Attr,
    AttrPair,
}

impl GroupFunc {
    pub fn code(self) -> u32 {
        match self {
            GroupFunc::Day => 0,
            GroupFunc::Week => 1,
            GroupFunc::Month => 2,
            GroupFunc::Year => 3,
            GroupFunc::Attr => 4,
            GroupFunc::AttrPair => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupBy {
    pub attribute: String,
    pub func: GroupFunc,
    pub group_sort: String,
}

/// Attribute types an override may replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttrType {
    Integer,
    Timestamp,
    Bool,
    Float,
    Bigint,
}

/// Per-document replacement values for one attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeOverride {
    pub attribute: String,
    pub attr_type: AttrType,
    /// Document id to value.
    pub values: BTreeMap<u64, serde_json::Value>,
}

/// Mutable state applied to every subsequent query.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuerySession {
    pub match_mode: MatchMode,
    pub limits: Limits,
    pub field_weights: BTreeMap<String, i32>,
    pub filters: Vec<Filter>,
    pub geo_anchor: Option<GeoAnchor>,
    pub sort: SortSpec,
    pub group_by: Option<GroupBy>,
    pub overrides: Vec<AttributeOverride>,
}

impl QuerySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset_filters(&mut self) {
        self.filters.clear();
    }

    pub fn reset_group_by(&mut self) {
        self.group_by = None;
    }

    pub fn reset_overrides(&mut self) {
        self.overrides.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session() {
        let session = QuerySession::new();
        assert_eq!(session.match_mode, MatchMode::All);
        assert_eq!(session.sort.mode, SortMode::Relevance);
        assert_eq!(session.limits, Limits::new(0, 20));
        assert!(session.filters.is_empty());
        assert!(session.geo_anchor.is_none());
    }

    #[test]
    fn test_codes() {
        assert_eq!(MatchMode::Extended2.code(), 6);
        assert_eq!(SortMode::Expr.code(), 5);
        assert_eq!(GroupFunc::Attr.code(), 4);
    }

    #[test]
    fn test_filter_accessors() {
        let filter = Filter::FloatRange {
            attribute: "price".to_string(),
            min: 1.0,
            max: 9.5,
            exclude: true,
        };
        assert_eq!(filter.attribute(), "price");
        assert!(filter.is_exclude());
    }

    #[test]
    fn test_filter_serialization_is_tagged() {
        let filter = Filter::Values {
            attribute: "forum_id".to_string(),
            values: vec![1, 2],
            exclude: false,
        };
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(json["type"], "values");
        assert_eq!(json["attribute"], "forum_id");
    }
}
