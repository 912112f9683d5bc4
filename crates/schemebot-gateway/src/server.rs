//! HTTP server implementation using Axum.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use schemebot_chat::Chatbot;
use schemebot_core::config::GatewayConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared state for the gateway server.
#[derive(Clone)]
pub struct AppState {
    /// The chat pipeline — safe for concurrent use, holds no mutable state
    /// of its own beyond the pooled store connection.
    pub chatbot: Arc<Chatbot>,
    pub start_time: std::time::Instant,
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let shared = Arc::new(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(super::routes::health_check))
        .route("/get_response", post(super::routes::get_bot_response))
        .route("/get_suggestions", get(super::routes::get_suggestions))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

/// Bind and serve until shutdown.
pub async fn serve(config: &GatewayConfig, chatbot: Arc<Chatbot>) -> anyhow::Result<()> {
    let state = AppState {
        chatbot,
        start_time: std::time::Instant::now(),
    };
    let router = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("🌐 Gateway listening on http://{addr}");
    axum::serve(listener, router).await?;
    Ok(())
}
