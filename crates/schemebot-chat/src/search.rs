//! Two-tier scheme search: relevance-ranked full-text (phrase, then loose),
//! with keyword-overlap ranking when the store's search capability fails.

use std::sync::Arc;

use schemebot_core::SchemebotError;
use schemebot_core::nlp::extract_keywords;
use schemebot_core::types::Scheme;
use schemebot_store::SchemeStore;
use tracing::{debug, warn};

/// Result sets are capped at three entries at every tier.
pub const MAX_RESULTS: usize = 3;

pub struct SearchEngine {
    store: Arc<dyn SchemeStore>,
}

impl SearchEngine {
    pub fn new(store: Arc<dyn SchemeStore>) -> Self {
        Self { store }
    }

    /// Full search ladder: exact phrase → loose terms → keyword overlap.
    /// Never errors; a tier that fails contributes no results.
    pub fn search(&self, query: &str) -> Vec<Scheme> {
        match self.store.find_schemes_by_phrase(query, MAX_RESULTS) {
            Ok(results) if !results.is_empty() => {
                debug!(count = results.len(), "Phrase search hit");
                return results;
            }
            Ok(_) => {}
            Err(SchemebotError::SearchUnavailable(e)) => {
                warn!("Full-text search unavailable, falling back to keywords: {e}");
                return self.keyword_search(&extract_keywords(query));
            }
            Err(e) => warn!("Phrase search failed: {e}"),
        }

        let terms: Vec<String> = query.split_whitespace().map(str::to_string).collect();
        match self.store.find_schemes_by_terms(&terms, MAX_RESULTS) {
            Ok(results) => {
                debug!(count = results.len(), "Loose search");
                results
            }
            Err(SchemebotError::SearchUnavailable(e)) => {
                warn!("Full-text search unavailable, falling back to keywords: {e}");
                self.keyword_search(&extract_keywords(query))
            }
            Err(e) => {
                warn!("Loose search failed: {e}");
                Vec::new()
            }
        }
    }

    /// Keyword-overlap ranking: schemes sharing at least one keyword with the
    /// query, best overlap first, at most three.
    pub fn keyword_search(&self, keywords: &[String]) -> Vec<Scheme> {
        if keywords.is_empty() {
            return Vec::new();
        }
        match self.store.find_schemes_by_keyword_overlap(keywords, MAX_RESULTS) {
            Ok(hits) => {
                let mut schemes: Vec<Scheme> = hits
                    .into_iter()
                    .filter(|(_, overlap)| *overlap > 0)
                    .map(|(scheme, _)| scheme)
                    .collect();
                schemes.truncate(MAX_RESULTS);
                schemes
            }
            Err(e) => {
                warn!("Keyword search failed: {e}");
                Vec::new()
            }
        }
    }
}
