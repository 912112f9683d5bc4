//! The store interface consumed by the chat pipeline.

use schemebot_core::Result;
use schemebot_core::types::{Intent, QueryLogEntry, Scheme};

/// An intent candidate with its store-assigned relevance score.
#[derive(Debug, Clone)]
pub struct ScoredIntent {
    pub intent: Intent,
    pub score: f32,
}

/// Read-side document store operations plus the fire-and-forget query log.
///
/// Ranking and enumeration orders are opaque total orders supplied by the
/// store; callers must not assume a specific tie-break beyond "deterministic
/// per call". Implementations must be safe for concurrent use.
pub trait SchemeStore: Send + Sync {
    /// Intents whose patterns relate to `text`, ranked descending by score.
    fn find_intents_by_relevance(&self, text: &str) -> Result<Vec<ScoredIntent>>;

    /// Relevance-ranked search treating `phrase` as an exact phrase.
    /// Fails with `SearchUnavailable` when the text index is missing.
    fn find_schemes_by_phrase(&self, phrase: &str, limit: usize) -> Result<Vec<Scheme>>;

    /// Loose (non-phrase) relevance-ranked search over the same index.
    /// Fails with `SearchUnavailable` when the text index is missing.
    fn find_schemes_by_terms(&self, terms: &[String], limit: usize) -> Result<Vec<Scheme>>;

    /// Schemes whose keyword set intersects `keywords`, paired with the
    /// intersection size, ordered descending by it (stable tie-break).
    fn find_schemes_by_keyword_overlap(
        &self,
        keywords: &[String],
        limit: usize,
    ) -> Result<Vec<(Scheme, usize)>>;

    /// Every known scheme name in the store's natural enumeration order.
    fn list_all_scheme_names(&self) -> Result<Vec<String>>;

    /// Append one query-log row. Callers treat failures as non-fatal.
    fn append_query_log(&self, entry: &QueryLogEntry) -> Result<()>;

    /// Number of scheme records (used for empty-store warnings at startup).
    fn count_schemes(&self) -> Result<u64>;

    /// Number of intent records.
    fn count_intents(&self) -> Result<u64>;
}
