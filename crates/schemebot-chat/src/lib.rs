//! # Schemebot Chat
//!
//! The response-resolution pipeline: raw user text in, one answer string out.
//!
//! ## Fallback ladder
//! ```text
//! User: "schemes for farmers"
//!   ↓ IntentMatcher — exact pattern, then substring, per ranked candidate
//!   ↓ SearchEngine — FTS phrase → loose terms → keyword overlap
//!   ↓ keyword-only retry (deliberate second attempt)
//!   ↓ fixed no-match response
//! ```
//! Every resolved turn appends exactly one query-log entry; the empty-input
//! short-circuit is the only branch that skips logging.

pub mod chatbot;
pub mod format;
pub mod intent;
pub mod search;

#[cfg(test)]
pub(crate) mod testutil;

pub use chatbot::Chatbot;
pub use format::format_results;
pub use intent::IntentMatcher;
pub use search::SearchEngine;
