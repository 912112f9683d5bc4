//! Rule-based intent matching against the intent store.

use std::sync::{Arc, Mutex};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use schemebot_core::types::Intent;
use schemebot_store::SchemeStore;
use tracing::{debug, warn};

/// Matches user input against stored intent patterns.
///
/// Candidates come back from the store ranked by relevance; for each
/// candidate, exact pattern equality is checked before substring containment,
/// then the loop moves to the next candidate. Whether a later-ranked exact
/// match can beat an earlier-ranked substring match is therefore decided by
/// rank order alone. Do not reorder these checks without a product decision.
pub struct IntentMatcher {
    store: Arc<dyn SchemeStore>,
    rng: Mutex<StdRng>,
}

impl IntentMatcher {
    pub fn new(store: Arc<dyn SchemeStore>) -> Self {
        Self {
            store,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Seeded constructor so tests can assert a deterministic reply choice.
    pub fn with_seed(store: Arc<dyn SchemeStore>, seed: u64) -> Self {
        Self {
            store,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Match the input against stored intents. `None` means no rule applied;
    /// store failures are logged and also treated as no-match — rule-based
    /// matching is best-effort.
    pub fn match_intent(&self, input: &str) -> Option<String> {
        let input = input.trim().to_lowercase();
        if input.is_empty() {
            return None;
        }

        let candidates = match self.store.find_intents_by_relevance(&input) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("Intent lookup failed: {e}");
                return None;
            }
        };

        for candidate in candidates {
            let intent = candidate.intent;

            // Exact matches catch short commands
            if intent.patterns.iter().any(|p| *p == input) {
                debug!(intent = %intent.intent, "Exact pattern match");
                if intent.list_all {
                    return self.render_scheme_listing(&intent);
                }
                return self.pick_response(&intent);
            }

            // Partial matching for longer queries
            if intent.patterns.iter().any(|p| input.contains(p.as_str())) {
                debug!(intent = %intent.intent, "Substring pattern match");
                return self.pick_response(&intent);
            }
        }

        None
    }

    /// The "list all" intent: first canned line, blank line, then every known
    /// scheme name as a 1-based numbered list in store enumeration order.
    fn render_scheme_listing(&self, intent: &Intent) -> Option<String> {
        let names = match self.store.list_all_scheme_names() {
            Ok(names) => names,
            Err(e) => {
                warn!("Scheme listing failed: {e}");
                return None;
            }
        };
        let lead = intent
            .responses
            .first()
            .map(String::as_str)
            .unwrap_or("Here are all schemes:");
        let mut response = format!("{lead}\n\n");
        for (i, name) in names.iter().enumerate() {
            response.push_str(&format!("{}. {}\n", i + 1, name));
        }
        Some(response)
    }

    /// One reply chosen uniformly at random from the intent's response set.
    fn pick_response(&self, intent: &Intent) -> Option<String> {
        let mut rng = self.rng.lock().ok()?;
        intent.responses.choose(&mut *rng).cloned()
    }
}
