//! # Schemebot Store
//!
//! The document database collaborator for the chat pipeline.
//!
//! ## Design
//! - **SQLite FTS5** for full-text search (built-in, zero setup)
//! - **BM25 scoring** — relevance ranking without embeddings
//! - **Keyword join table** — intersection-count fallback ranking
//! - **Append-only query log** — one row per resolved user turn
//!
//! The pipeline only sees the [`SchemeStore`] trait; [`SqliteSchemeStore`]
//! is the production implementation and tests substitute their own doubles.

pub mod seed;
pub mod sqlite;
pub mod store;

pub use sqlite::SqliteSchemeStore;
pub use store::{SchemeStore, ScoredIntent};
