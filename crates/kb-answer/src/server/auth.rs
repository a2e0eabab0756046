//! Shared-secret bearer authentication for the service API
//!
//! This guards the inbound HTTP surface and is unrelated to the cloud
//! credential used against the search backend.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;

/// Middleware that rejects requests without the configured bearer token
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| Error::Unauthorized("Authorization header required".to_string()))?;

    let token = bearer_token(header)
        .ok_or_else(|| Error::Unauthorized("Invalid authorization format".to_string()))?;

    if token != state.service_api_key() {
        return Err(Error::Unauthorized("Invalid API key".to_string()));
    }

    Ok(next.run(request).await)
}

/// Extract the token from a `Bearer <token>` header value
fn bearer_token(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ")
}
