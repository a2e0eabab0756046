//! API routes for the answer server

pub mod ask;
pub mod chat;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::server::auth;
use crate::server::state::AppState;

/// Build all API routes. The question and chat endpoints sit behind the
/// shared-secret bearer check; health does not.
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/hackrx/run", post(ask::run_questions))
        .route("/chat", post(chat::chat_message))
        .route_layer(middleware::from_fn_with_state(state, auth::require_bearer))
        .route("/health", get(health))
}

/// Health check with the engine identifiers this instance points at
async fn health(state: axum::extract::State<AppState>) -> Json<serde_json::Value> {
    let discovery = &state.config().discovery;
    Json(json!({
        "status": "healthy",
        "service": "kb-answer",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "discovery_engine": {
            "project_id": discovery.project_id,
            "engine_id": discovery.engine_id,
            "location": discovery.location,
        }
    }))
}
