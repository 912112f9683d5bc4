//! API route handlers for the gateway.

use axum::{Json, extract::State};
use std::sync::Arc;

use super::server::AppState;

/// Health check endpoint.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "schemebot-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.start_time.elapsed().as_secs(),
    }))
}

/// Chat endpoint: `{ "message": ... }` in, `{ "response": ... }` out.
/// A blank message short-circuits before the pipeline runs.
pub async fn get_bot_response(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    let message = body["message"].as_str().unwrap_or("").trim();
    if message.is_empty() {
        return Json(serde_json::json!({ "response": "Please enter a message." }));
    }

    let response = state.chatbot.get_response(message);
    Json(serde_json::json!({ "response": response }))
}

/// Common suggestion categories the UI offers as one-tap queries.
pub async fn get_suggestions() -> Json<serde_json::Value> {
    Json(serde_json::json!([
        { "text": "List all schemes", "query": "List all schemes" },
        { "text": "Education schemes", "query": "Education schemes" },
        { "text": "Health schemes", "query": "Health schemes" },
        { "text": "Schemes for women", "query": "Schemes for women" },
        { "text": "Agriculture schemes", "query": "Agriculture schemes" },
        { "text": "Housing schemes", "query": "Housing schemes" },
        { "text": "Help", "query": "Help" }
    ]))
}
