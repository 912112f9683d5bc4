//! In-memory `SchemeStore` double for pipeline tests.

use std::sync::Mutex;

use schemebot_core::error::{Result, SchemebotError};
use schemebot_core::types::{Intent, QueryLogEntry, Scheme};
use schemebot_store::{SchemeStore, ScoredIntent};

pub fn sample_scheme(name: &str, keywords: &[&str]) -> Scheme {
    Scheme {
        name: name.into(),
        description: Some(format!("{name} helps eligible residents")),
        eligibility: Some("All residents of the state".into()),
        benefits: Some("Financial assistance".into()),
        documents_required: vec!["Aadhaar card".into()],
        application_process: Some("Apply at the nearest office".into()),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

/// Vec-backed store with switchable failure modes.
#[derive(Default)]
pub struct MemStore {
    pub schemes: Vec<Scheme>,
    pub intents: Vec<Intent>,
    pub fail_fulltext: bool,
    pub fail_intents: bool,
    pub log: Mutex<Vec<QueryLogEntry>>,
}

impl MemStore {
    pub fn with_intents(intents: Vec<Intent>) -> Self {
        Self {
            intents,
            ..Default::default()
        }
    }

    pub fn schemes(mut self, schemes: Vec<Scheme>) -> Self {
        self.schemes = schemes;
        self
    }

    /// Make phrase and loose search fail with `SearchUnavailable`.
    pub fn failing_fulltext(mut self) -> Self {
        self.fail_fulltext = true;
        self
    }

    /// Make intent lookup fail with a store error.
    pub fn failing_intents(mut self) -> Self {
        self.fail_intents = true;
        self
    }

    pub fn log_entries(&self) -> Vec<QueryLogEntry> {
        self.log.lock().unwrap().clone()
    }
}

fn haystack(scheme: &Scheme) -> String {
    format!(
        "{} {} {} {} {}",
        scheme.name,
        scheme.description.as_deref().unwrap_or(""),
        scheme.eligibility.as_deref().unwrap_or(""),
        scheme.benefits.as_deref().unwrap_or(""),
        scheme.keywords.join(" "),
    )
    .to_lowercase()
}

impl SchemeStore for MemStore {
    fn find_intents_by_relevance(&self, _text: &str) -> Result<Vec<ScoredIntent>> {
        if self.fail_intents {
            return Err(SchemebotError::Store("intent index offline".into()));
        }
        // Declaration order stands in for the store's relevance ranking.
        let total = self.intents.len();
        Ok(self
            .intents
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, intent)| ScoredIntent {
                intent,
                score: (total - i) as f32,
            })
            .collect())
    }

    fn find_schemes_by_phrase(&self, phrase: &str, limit: usize) -> Result<Vec<Scheme>> {
        if self.fail_fulltext {
            return Err(SchemebotError::SearchUnavailable("no text index".into()));
        }
        let phrase = phrase.to_lowercase();
        Ok(self
            .schemes
            .iter()
            .filter(|s| haystack(s).contains(&phrase))
            .take(limit)
            .cloned()
            .collect())
    }

    fn find_schemes_by_terms(&self, terms: &[String], limit: usize) -> Result<Vec<Scheme>> {
        if self.fail_fulltext {
            return Err(SchemebotError::SearchUnavailable("no text index".into()));
        }
        let terms: Vec<String> = terms.iter().map(|t| t.to_lowercase()).collect();
        Ok(self
            .schemes
            .iter()
            .filter(|s| {
                let hay = haystack(s);
                terms.iter().any(|t| hay.contains(t))
            })
            .take(limit)
            .cloned()
            .collect())
    }

    fn find_schemes_by_keyword_overlap(
        &self,
        keywords: &[String],
        limit: usize,
    ) -> Result<Vec<(Scheme, usize)>> {
        let mut hits: Vec<(Scheme, usize)> = self
            .schemes
            .iter()
            .map(|s| {
                let overlap = s
                    .keywords
                    .iter()
                    .filter(|k| keywords.iter().any(|q| q.eq_ignore_ascii_case(k)))
                    .count();
                (s.clone(), overlap)
            })
            .filter(|(_, overlap)| *overlap > 0)
            .collect();
        hits.sort_by(|a, b| b.1.cmp(&a.1));
        hits.truncate(limit);
        Ok(hits)
    }

    fn list_all_scheme_names(&self) -> Result<Vec<String>> {
        Ok(self.schemes.iter().map(|s| s.name.clone()).collect())
    }

    fn append_query_log(&self, entry: &QueryLogEntry) -> Result<()> {
        self.log
            .lock()
            .map_err(|e| SchemebotError::Store(e.to_string()))?
            .push(entry.clone());
        Ok(())
    }

    fn count_schemes(&self) -> Result<u64> {
        Ok(self.schemes.len() as u64)
    }

    fn count_intents(&self) -> Result<u64> {
        Ok(self.intents.len() as u64)
    }
}
