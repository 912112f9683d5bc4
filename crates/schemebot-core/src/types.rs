//! Core data types shared across the workspace.

use serde::{Deserialize, Serialize};

/// A government welfare scheme record. Read-only from the pipeline's
/// perspective — records are created and maintained by the seeding process.
///
/// The four prose fields are optional because the store is a document
/// database: the data contract requires them, but the formatter must detect
/// absence and fail with `MissingField` instead of rendering a hole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scheme {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub eligibility: Option<String>,
    #[serde(default)]
    pub benefits: Option<String>,
    #[serde(default)]
    pub documents_required: Vec<String>,
    #[serde(default)]
    pub application_process: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// A canned conversational rule: trigger patterns mapped to candidate replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intent {
    /// Intent label, e.g. "greeting" or "list_all".
    pub intent: String,
    /// Patterns matched case-insensitively against the trimmed input.
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Candidate replies; one is chosen at random per match.
    #[serde(default)]
    pub responses: Vec<String>,
    /// Marks the special intent that enumerates every known scheme name.
    #[serde(default)]
    pub list_all: bool,
}

/// One logged user turn, appended after every resolved query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub query: String,
    pub tokens: Vec<String>,
    pub response: String,
}

/// Ephemeral result of text normalization. Lives for a single request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedText {
    /// Lowercased input with punctuation stripped.
    pub original: String,
    /// Whitespace-split tokens with stop-words removed, pre-stemming.
    pub tokens: Vec<String>,
    /// The tokens after Snowball stemming.
    pub stemmed: Vec<String>,
}
