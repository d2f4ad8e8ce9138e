//! Query composition and execution.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::config::SphinxConfig;
use crate::error::{Result, SphinxSearchError};
use crate::registry::{IndexRegistry, Resolution};
use crate::search::client::{BatchEntry, SearchClient, ServerAddress};
use crate::search::excerpt::ExcerptOptions;
use crate::search::result::QueryResult;
use crate::search::session::{
    AttrType, AttributeOverride, Filter, GeoAnchor, GroupBy, GroupFunc, Limits, MatchMode,
    QuerySession, SortMode, SortSpec,
};

/// Per-call overrides for [`SphinxSearch::search`].
///
/// Offset and limit only take effect when both are given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    pub result_offset: Option<u32>,
    pub result_limit: Option<u32>,
    pub field_weights: Option<BTreeMap<String, i32>>,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, offset: u32, limit: u32) -> Self {
        self.result_offset = Some(offset);
        self.result_limit = Some(limit);
        self
    }

    pub fn with_field_weights<I, K>(mut self, weights: I) -> Self
    where
        I: IntoIterator<Item = (K, i32)>,
        K: Into<String>,
    {
        self.field_weights = Some(weights.into_iter().map(|(k, w)| (k.into(), w)).collect());
        self
    }

    fn has_overrides(&self) -> bool {
        (self.result_offset.is_some() && self.result_limit.is_some())
            || self.field_weights.is_some()
    }
}

/// Search service over a [`SearchClient`].
///
/// Holds the query session (filters, weights, limits, sort, geo anchor) and
/// the pending batch. One instance is meant to serve one logical session;
/// concurrent callers must serialize access themselves.
#[derive(Debug)]
pub struct SphinxSearch<C: SearchClient> {
    client: C,
    registry: IndexRegistry,
    address: ServerAddress,
    session: QuerySession,
    batch: Vec<BatchEntry>,
}

impl<C: SearchClient> SphinxSearch<C> {
    /// Create the service and point `client` at `address`.
    pub fn new(mut client: C, registry: IndexRegistry, address: ServerAddress) -> Result<Self> {
        log::debug!("Using search daemon at {address}");
        client.set_server(&address)?;
        Ok(Self {
            client,
            registry,
            address,
            session: QuerySession::new(),
            batch: Vec::new(),
        })
    }

    pub fn from_config(client: C, config: &SphinxConfig) -> Result<Self> {
        Self::new(client, config.indexes.clone(), config.searchd.address())
    }

    /// Escape query-syntax characters through the client.
    pub fn escape_string(&self, text: &str) -> String {
        self.client.escape_string(text)
    }

    pub fn set_match_mode(&mut self, mode: MatchMode) {
        self.session.match_mode = mode;
    }

    /// Set result window limits. A `max_matches` of 0 keeps the current value.
    pub fn set_limits(
        &mut self,
        offset: u32,
        limit: u32,
        max_matches: u32,
        cutoff: u32,
    ) -> Result<()> {
        apply_limits(&mut self.session.limits, offset, limit, max_matches, cutoff)
    }

    /// Replace all field weights.
    pub fn set_field_weights<I, K>(&mut self, weights: I)
    where
        I: IntoIterator<Item = (K, i32)>,
        K: Into<String>,
    {
        self.session.field_weights = weights.into_iter().map(|(k, w)| (k.into(), w)).collect();
    }

    /// Add a values filter. An empty value list adds nothing.
    pub fn set_filter<S: Into<String>>(&mut self, attribute: S, values: &[i64], exclude: bool) {
        if values.is_empty() {
            return;
        }
        self.session.filters.push(Filter::Values {
            attribute: attribute.into(),
            values: values.to_vec(),
            exclude,
        });
    }

    /// Add an integer range filter.
    pub fn set_filter_range<S: Into<String>>(
        &mut self,
        attribute: S,
        min: i64,
        max: i64,
        exclude: bool,
    ) -> Result<()> {
        if min > max {
            return Err(SphinxSearchError::invalid_argument(format!(
                "range filter min {min} is greater than max {max}"
            )));
        }
        self.session.filters.push(Filter::Range {
            attribute: attribute.into(),
            min,
            max,
            exclude,
        });
        Ok(())
    }

    /// Add a float range filter.
    pub fn set_filter_float_range<S: Into<String>>(
        &mut self,
        attribute: S,
        min: f32,
        max: f32,
        exclude: bool,
    ) -> Result<()> {
        if min > max || min.is_nan() || max.is_nan() {
            return Err(SphinxSearchError::invalid_argument(format!(
                "float range filter [{min}, {max}] is not a valid range"
            )));
        }
        self.session.filters.push(Filter::FloatRange {
            attribute: attribute.into(),
            min,
            max,
            exclude,
        });
        Ok(())
    }

    pub fn reset_filters(&mut self) {
        self.session.reset_filters();
    }

    /// Set the anchor for geodistance. `lat` and `long` are in radians.
    pub fn set_geo_anchor<A: Into<String>, B: Into<String>>(
        &mut self,
        lat_attr: A,
        long_attr: B,
        lat: f32,
        long: f32,
    ) {
        self.session.geo_anchor = Some(GeoAnchor {
            lat_attr: lat_attr.into(),
            long_attr: long_attr.into(),
            lat,
            long,
        });
    }

    pub fn set_sort_mode<S: Into<String>>(&mut self, mode: SortMode, sort_by: S) {
        self.session.sort = SortSpec {
            mode,
            sort_by: sort_by.into(),
        };
    }

    pub fn set_group_by<A: Into<String>, S: Into<String>>(
        &mut self,
        attribute: A,
        func: GroupFunc,
        group_sort: S,
    ) {
        self.session.group_by = Some(GroupBy {
            attribute: attribute.into(),
            func,
            group_sort: group_sort.into(),
        });
    }

    pub fn set_override<S: Into<String>>(
        &mut self,
        attribute: S,
        attr_type: AttrType,
        values: BTreeMap<u64, serde_json::Value>,
    ) {
        self.session.overrides.push(AttributeOverride {
            attribute: attribute.into(),
            attr_type,
            values,
        });
    }

    /// Clear filters, group-by and overrides, and sort by relevance again.
    /// Limits, weights and the geo anchor are kept.
    pub fn reset_all(&mut self) {
        self.session.reset_filters();
        self.session.reset_group_by();
        self.session.reset_overrides();
        self.set_sort_mode(SortMode::Relevance, "");
    }

    /// Run a single query against the given logical indexes.
    ///
    /// Unknown index names are skipped; when none resolve an empty result is
    /// returned without contacting the daemon. A non-OK status is reported as
    /// [`SphinxSearchError::Search`], labelled with the last name in
    /// `indexes` whichever index actually failed.
    pub fn search<S: AsRef<str>>(
        &mut self,
        query: &str,
        indexes: &[S],
        options: &SearchOptions,
        escape_query: bool,
    ) -> Result<QueryResult> {
        let query = if escape_query {
            self.client.escape_string(query)
        } else {
            query.to_string()
        };

        let resolution = self.resolve(indexes);
        if resolution.is_empty() {
            log::debug!("No configured index in {} name(s); returning empty result", indexes.len());
            return Ok(QueryResult::empty());
        }
        let index_names = resolution.joined();

        let session = session_for(&self.session, options)?;
        log::debug!("Querying \"{query}\" on [{index_names}]");

        let label = resolution.last_label.unwrap_or_default();
        match self.client.query(&session, &query, &index_names) {
            Ok(result) if result.status.is_ok() => Ok(result),
            Ok(result) => {
                let message = match self.client.last_error() {
                    last if !last.is_empty() => last,
                    _ => result.error,
                };
                Err(SphinxSearchError::search(label, query, message))
            }
            Err(err) => {
                let message = match self.client.last_error() {
                    last if !last.is_empty() => last,
                    _ => err.to_string(),
                };
                Err(SphinxSearchError::search(label, query, message))
            }
        }
    }

    /// Queue a query for [`SphinxSearch::run_queries`] under the current
    /// session. Does nothing when no index resolves.
    pub fn add_query<S: AsRef<str>>(&mut self, query: &str, indexes: &[S]) {
        let resolution = self.resolve(indexes);
        if resolution.is_empty() {
            log::debug!("Not queueing \"{query}\": no configured index");
            return;
        }
        self.batch.push(BatchEntry {
            query: query.to_string(),
            indexes: resolution.joined(),
            session: self.session.clone(),
        });
    }

    /// Execute the queued batch. Results come back one per queued query, in
    /// queue order. The queue is emptied whether or not the call succeeds.
    pub fn run_queries(&mut self) -> Result<Vec<QueryResult>> {
        let batch = std::mem::take(&mut self.batch);
        if batch.is_empty() {
            return Ok(Vec::new());
        }
        log::debug!("Running batch of {} queries", batch.len());
        self.client.run_queries(&batch)
    }

    /// Highlight `terms` in a single text. `None` when excerpt generation
    /// fails or produces nothing.
    pub fn get_snippet(
        &mut self,
        text: &str,
        index: &str,
        terms: &str,
        options: &ExcerptOptions,
    ) -> Option<String> {
        self.get_snippets(&[text], index, terms, options)
            .and_then(|snippets| snippets.into_iter().next())
    }

    /// Highlight `terms` in each text. `None` when excerpt generation fails.
    pub fn get_snippets<S: AsRef<str>>(
        &mut self,
        texts: &[S],
        index: &str,
        terms: &str,
        options: &ExcerptOptions,
    ) -> Option<Vec<String>> {
        let docs: Vec<String> = texts.iter().map(|t| t.as_ref().to_string()).collect();
        match self.client.build_excerpts(&docs, index, terms, options) {
            Ok(snippets) => Some(snippets),
            Err(err) => {
                log::warn!("Building excerpts on \"{index}\" failed: {err}");
                None
            }
        }
    }

    fn resolve<S: AsRef<str>>(&self, indexes: &[S]) -> Resolution {
        self.registry.resolve_all(indexes)
    }

    pub fn session(&self) -> &QuerySession {
        &self.session
    }

    /// Queries waiting for [`SphinxSearch::run_queries`].
    pub fn pending_queries(&self) -> &[BatchEntry] {
        &self.batch
    }

    pub fn registry(&self) -> &IndexRegistry {
        &self.registry
    }

    pub fn address(&self) -> &ServerAddress {
        &self.address
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }
}

fn session_for<'a>(
    session: &'a QuerySession,
    options: &SearchOptions,
) -> Result<Cow<'a, QuerySession>> {
    if !options.has_overrides() {
        return Ok(Cow::Borrowed(session));
    }

    let mut session = session.clone();
    if let (Some(offset), Some(limit)) = (options.result_offset, options.result_limit) {
        apply_limits(&mut session.limits, offset, limit, 0, 0)?;
    }
    if let Some(weights) = &options.field_weights {
        session.field_weights = weights.clone();
    }
    Ok(Cow::Owned(session))
}

fn apply_limits(
    limits: &mut Limits,
    offset: u32,
    limit: u32,
    max_matches: u32,
    cutoff: u32,
) -> Result<()> {
    if limit == 0 {
        return Err(SphinxSearchError::invalid_argument("limit must be greater than zero"));
    }
    limits.offset = offset;
    limits.limit = limit;
    if max_matches > 0 {
        limits.max_matches = max_matches;
    }
    limits.cutoff = cutoff;
    Ok(())
}
