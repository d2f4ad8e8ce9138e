//! Query composition and execution against the search daemon.
//!
//! [`SphinxSearch`] accumulates filters, weights, limits, sort order and geo
//! anchor in an explicit [`QuerySession`], resolves logical index names
//! through the [`IndexRegistry`](crate::registry::IndexRegistry) and runs
//! single or batched queries through a [`SearchClient`].
//!
//! # Example
//!
//! ```ignore
//! use sphinxsearch::search::{SearchOptions, SphinxSearch, SortMode};
//!
//! let mut search = SphinxSearch::from_config(client, &config)?;
//! search.set_filter("forum_id", &[3, 4], false);
//! search.set_sort_mode(SortMode::AttrDesc, "created_at");
//!
//! let result = search.search("rust borrow", &["Threads"], &SearchOptions::new(), true)?;
//! for m in &result.matches {
//!     println!("{} ({})", m.id, m.weight);
//! }
//! ```

pub mod client;
pub mod engine;
pub mod escape;
pub mod excerpt;
pub mod result;
pub mod session;

pub use client::{BatchEntry, SearchClient, ServerAddress};
pub use engine::{SearchOptions, SphinxSearch};
pub use escape::escape_query;
pub use excerpt::ExcerptOptions;
pub use result::{Match, QueryResult, SearchStatus, WordStats};
pub use session::{
    AttrType, AttributeOverride, Filter, GeoAnchor, GroupBy, GroupFunc, Limits, MatchMode,
    QuerySession, SortMode, SortSpec,
};
