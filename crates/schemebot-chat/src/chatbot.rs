//! The response-resolution pipeline: intents first, then the search ladder,
//! then the fixed no-match response.

use std::sync::Arc;

use schemebot_core::Result;
use schemebot_core::nlp::{extract_keywords, normalize};
use schemebot_core::types::QueryLogEntry;
use schemebot_store::SchemeStore;
use tracing::{error, warn};

use crate::format::format_results;
use crate::intent::IntentMatcher;
use crate::search::SearchEngine;

/// Returned for empty or whitespace-only input. The one branch that skips
/// the query log.
pub const EMPTY_INPUT_PROMPT: &str = "Please ask me about government schemes.";

/// Returned when every resolution stage came up empty.
pub const NO_MATCH_RESPONSE: &str = "I couldn't find any schemes matching your query. \
    You can try asking about specific categories like education, health, \
    agriculture, women, etc., or ask to 'list all schemes'.";

/// Returned by `get_response` when a scheme record violated the data
/// contract mid-format. Operators see the real error in the logs.
pub const DATA_ERROR_RESPONSE: &str =
    "Sorry, there was an error processing your request. Please try again.";

pub struct Chatbot {
    store: Arc<dyn SchemeStore>,
    matcher: IntentMatcher,
    engine: SearchEngine,
}

impl Chatbot {
    pub fn new(store: Arc<dyn SchemeStore>) -> Self {
        Self {
            matcher: IntentMatcher::new(store.clone()),
            engine: SearchEngine::new(store.clone()),
            store,
        }
    }

    /// Seeded constructor for deterministic canned-response choice in tests.
    pub fn with_seed(store: Arc<dyn SchemeStore>, seed: u64) -> Self {
        Self {
            matcher: IntentMatcher::with_seed(store.clone(), seed),
            engine: SearchEngine::new(store.clone()),
            store,
        }
    }

    /// Resolve user input to a displayable answer. Never fails: corrupt
    /// scheme data is logged for operators and mapped to a fixed apology.
    pub fn get_response(&self, input: &str) -> String {
        match self.respond(input) {
            Ok(reply) => reply,
            Err(e) => {
                error!("Pipeline failed on corrupt scheme data: {e}");
                self.log(input, normalize(input).tokens, DATA_ERROR_RESPONSE);
                DATA_ERROR_RESPONSE.to_string()
            }
        }
    }

    /// The fallible pipeline. Only `MissingField` can surface here; every
    /// store failure degrades to the next stage instead.
    pub fn respond(&self, input: &str) -> Result<String> {
        if input.trim().is_empty() {
            return Ok(EMPTY_INPUT_PROMPT.to_string());
        }

        // Stage 1: rule-based intents
        if let Some(reply) = self.matcher.match_intent(input) {
            self.log(input, normalize(input).tokens, &reply);
            return Ok(reply);
        }

        let processed = normalize(input);

        // Stage 2: full-text search ladder
        let results = self.engine.search(input);
        if let Some(reply) = format_results(&results)? {
            self.log(input, processed.tokens.clone(), &reply);
            return Ok(reply);
        }

        // Stage 3: keyword-only retry. This repeats the engine's internal
        // fallback on purpose — it still fires when full-text search returned
        // empty-handed rather than failing, so keyword matches are never lost.
        let keywords = extract_keywords(input);
        let results = self.engine.keyword_search(&keywords);
        if let Some(reply) = format_results(&results)? {
            self.log(input, processed.tokens.clone(), &reply);
            return Ok(reply);
        }

        // Stage 4: fixed no-match response
        self.log(input, processed.tokens, NO_MATCH_RESPONSE);
        Ok(NO_MATCH_RESPONSE.to_string())
    }

    /// Append one query-log row. Fire-and-forget: a failed write must never
    /// affect the answer already produced.
    fn log(&self, query: &str, tokens: Vec<String>, response: &str) {
        let entry = QueryLogEntry {
            query: query.to_string(),
            tokens,
            response: response.to_string(),
        };
        if let Err(e) = self.store.append_query_log(&entry) {
            warn!("Failed to append query log: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{MemStore, sample_scheme};
    use schemebot_core::types::Intent;

    fn greeting_intent() -> Intent {
        Intent {
            intent: "greeting".into(),
            patterns: vec!["hello".into()],
            responses: vec!["Hello! Ask me about schemes.".into()],
            list_all: false,
        }
    }

    #[test]
    fn test_empty_input_returns_prompt_without_logging() {
        let store = Arc::new(MemStore::default());
        let chatbot = Chatbot::with_seed(store.clone(), 0);
        assert_eq!(chatbot.get_response(""), EMPTY_INPUT_PROMPT);
        assert_eq!(chatbot.get_response("   \t"), EMPTY_INPUT_PROMPT);
        assert!(store.log_entries().is_empty());
    }

    #[test]
    fn test_intent_match_wins_over_scheme_search() {
        // "hello" is both an intent pattern and part of a scheme name; the
        // intent stage runs first and must win.
        let store = Arc::new(
            MemStore::with_intents(vec![greeting_intent()])
                .schemes(vec![sample_scheme("Hello Housing Scheme", &["housing"])]),
        );
        let chatbot = Chatbot::with_seed(store.clone(), 0);
        assert_eq!(chatbot.get_response("hello"), "Hello! Ask me about schemes.");
        let log = store.log_entries();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].response, "Hello! Ask me about schemes.");
    }

    #[test]
    fn test_substring_intent_wins_over_fulltext_match() {
        let store = Arc::new(
            MemStore::with_intents(vec![greeting_intent()])
                .schemes(vec![sample_scheme("Education Scheme", &["education"])]),
        );
        let chatbot = Chatbot::with_seed(store.clone(), 0);
        let reply = chatbot.get_response("hello, any education scheme?");
        assert_eq!(reply, "Hello! Ask me about schemes.");
    }

    #[test]
    fn test_search_produces_detail_response() {
        let store = Arc::new(
            MemStore::default().schemes(vec![sample_scheme("Education Scheme", &["education"])]),
        );
        let chatbot = Chatbot::with_seed(store.clone(), 0);
        let reply = chatbot.get_response("education scheme");
        assert!(reply.starts_with("I found a scheme that might interest you:"));
        assert!(reply.contains("Name: Education Scheme"));
        assert_eq!(store.log_entries().len(), 1);
    }

    #[test]
    fn test_keyword_retry_catches_what_fulltext_missed() {
        // Punctuation defeats the substring-based full-text double, but the
        // normalizer strips it, so the keyword-only retry still connects.
        let store = Arc::new(
            MemStore::default().schemes(vec![sample_scheme("Education Scheme", &["education"])]),
        );
        let chatbot = Chatbot::with_seed(store.clone(), 0);
        let reply = chatbot.get_response("education???");
        assert!(reply.contains("Name: Education Scheme"));
        assert_eq!(store.log_entries().len(), 1);
    }

    #[test]
    fn test_search_capability_failure_degrades_to_keywords() {
        let store = Arc::new(
            MemStore::default()
                .schemes(vec![sample_scheme("Education Scheme", &["education"])])
                .failing_fulltext(),
        );
        let chatbot = Chatbot::with_seed(store.clone(), 0);
        let reply = chatbot.get_response("education grants");
        assert!(reply.starts_with("I found a scheme that might interest you:"));
    }

    #[test]
    fn test_no_match_returns_fixed_response_and_logs() {
        let store = Arc::new(MemStore::default());
        let chatbot = Chatbot::with_seed(store.clone(), 0);
        assert_eq!(chatbot.get_response("quantum flux"), NO_MATCH_RESPONSE);
        let log = store.log_entries();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].query, "quantum flux");
        assert_eq!(log[0].response, NO_MATCH_RESPONSE);
    }

    #[test]
    fn test_list_all_schemes_end_to_end() {
        let list_intent = Intent {
            intent: "list_all".into(),
            patterns: vec!["list all schemes".into()],
            responses: vec!["Here are all the schemes I know about:".into()],
            list_all: true,
        };
        let store = Arc::new(
            MemStore::with_intents(vec![list_intent])
                .schemes(vec![sample_scheme("Scheme A", &[]), sample_scheme("Scheme B", &[])]),
        );
        let chatbot = Chatbot::with_seed(store.clone(), 0);
        let reply = chatbot.get_response("list all schemes");
        assert_eq!(
            reply,
            "Here are all the schemes I know about:\n\n1. Scheme A\n2. Scheme B\n"
        );
        assert_eq!(store.log_entries().len(), 1);
    }

    #[test]
    fn test_same_input_twice_logs_twice() {
        let store = Arc::new(
            MemStore::default().schemes(vec![sample_scheme("Education Scheme", &["education"])]),
        );
        let chatbot = Chatbot::with_seed(store.clone(), 0);
        let first = chatbot.get_response("education scheme");
        let second = chatbot.get_response("education scheme");
        assert_eq!(first, second);
        assert_eq!(store.log_entries().len(), 2);
    }

    #[test]
    fn test_corrupt_scheme_record_fails_loudly_but_not_to_users() {
        let mut scheme = sample_scheme("Broken Scheme", &["broken"]);
        scheme.benefits = None;
        let store = Arc::new(MemStore::default().schemes(vec![scheme]));
        let chatbot = Chatbot::with_seed(store.clone(), 0);

        assert!(chatbot.respond("broken scheme").is_err());
        assert_eq!(chatbot.get_response("broken scheme"), DATA_ERROR_RESPONSE);
    }

    #[test]
    fn test_logged_tokens_are_normalized() {
        let store = Arc::new(
            MemStore::default().schemes(vec![sample_scheme("Education Scheme", &["education"])]),
        );
        let chatbot = Chatbot::with_seed(store.clone(), 0);
        chatbot.get_response("What about the Education Scheme?");
        let log = store.log_entries();
        assert_eq!(log[0].tokens, vec!["education", "scheme"]);
    }
}
