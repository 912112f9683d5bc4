//! Text normalization: lowercase, strip punctuation, tokenize, drop
//! stop-words, stem. Pure functions, no I/O.

use std::collections::HashSet;

use rust_stemmers::{Algorithm, Stemmer};

use crate::types::NormalizedText;

/// Normalize raw user text into the form the pipeline works with.
///
/// Empty input yields an empty `original` and empty token sequences.
pub fn normalize(text: &str) -> NormalizedText {
    let original: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_')
        .collect();

    let stops = stop_words();
    let tokens: Vec<String> = original
        .split_whitespace()
        .filter(|t| !stops.contains(*t))
        .map(str::to_string)
        .collect();

    let stemmer = Stemmer::create(Algorithm::English);
    let stemmed = tokens.iter().map(|t| stemmer.stem(t).into_owned()).collect();

    NormalizedText {
        original,
        tokens,
        stemmed,
    }
}

/// Query keywords: the stop-word-filtered, pre-stem token view of `normalize`.
pub fn extract_keywords(text: &str) -> Vec<String> {
    normalize(text).tokens
}

/// Fixed English stop-word set.
pub fn stop_words() -> HashSet<&'static str> {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "you", "your", "yours", "he", "him",
        "his", "she", "her", "it", "its", "they", "them", "their", "what", "which", "who",
        "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
        "been", "being", "have", "has", "had", "do", "does", "did", "a", "an", "the", "and",
        "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for", "with",
        "about", "against", "between", "into", "through", "during", "before", "after", "to",
        "from", "up", "down", "in", "out", "on", "off", "over", "under", "again", "then",
        "once", "here", "there", "when", "where", "why", "how", "all", "any", "both", "each",
        "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only", "own",
        "same", "so", "than", "too", "very", "can", "will", "just", "should", "now",
    ]
    .into_iter()
    .collect()
}
