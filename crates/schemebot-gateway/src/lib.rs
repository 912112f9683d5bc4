//! # Schemebot Gateway
//!
//! Thin HTTP layer over the chat pipeline. Three routes: a health check,
//! the chat endpoint, and the suggestion chips the UI renders.

pub mod routes;
pub mod server;

pub use server::{AppState, build_router, serve};
