//! # Schemebot Core
//!
//! Shared foundation for the Schemebot workspace:
//! - **types** — `Scheme`, `Intent`, `QueryLogEntry`, `NormalizedText`
//! - **nlp** — lowercasing, punctuation stripping, stop-word removal, stemming
//! - **error** — the `SchemebotError` taxonomy and `Result` alias
//! - **config** — TOML configuration under `~/.schemebot/`

pub mod config;
pub mod error;
pub mod nlp;
pub mod types;

pub use error::{Result, SchemebotError};
