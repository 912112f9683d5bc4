//! Error taxonomy for Schemebot.

use thiserror::Error;

/// All errors produced inside the Schemebot workspace.
#[derive(Debug, Error)]
pub enum SchemebotError {
    /// Configuration file could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// Store connectivity or bootstrap failure. Surfaced only when opening
    /// the store; per-query store failures degrade to the next pipeline stage.
    #[error("Store error: {0}")]
    Store(String),

    /// The store's full-text search capability is unavailable (e.g. missing
    /// FTS index). Triggers the keyword fallback, never shown to users.
    #[error("Full-text search unavailable: {0}")]
    SearchUnavailable(String),

    /// A scheme record violated the data contract while being formatted.
    /// Indicates corrupt source data, so this one is allowed to propagate.
    #[error("Scheme '{scheme}' is missing required field '{field}'")]
    MissingField {
        scheme: String,
        field: &'static str,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SchemebotError>;
