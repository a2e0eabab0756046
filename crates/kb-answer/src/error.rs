//! Error types for the grounded answer service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Service errors
#[derive(Debug, Error)]
pub enum Error {
    /// No usable cloud credential could be acquired (fatal for a batch)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Search endpoint returned a non-success status
    #[error("Search request failed with status {status}")]
    SearchStatus { status: u16 },

    /// Search request exceeded the fixed timeout
    #[error("Search request timed out after {0}s")]
    SearchTimeout(u64),

    /// Generative model call failed
    #[error("Synthesis error: {0}")]
    Synthesis(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bad inbound request
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Missing or invalid service bearer token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an authentication error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Create a synthesis error
    pub fn synthesis(message: impl Into<String>) -> Self {
        Self::Synthesis(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            Error::Auth(msg) => (StatusCode::SERVICE_UNAVAILABLE, "auth_error", msg.clone()),
            Error::SearchStatus { status } => (
                StatusCode::BAD_GATEWAY,
                "search_error",
                format!("Search backend returned status {}", status),
            ),
            Error::SearchTimeout(secs) => (
                StatusCode::GATEWAY_TIMEOUT,
                "search_timeout",
                format!("Search backend did not respond within {}s", secs),
            ),
            Error::Synthesis(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "synthesis_error", msg.clone())
            }
            Error::Config(msg) => (StatusCode::BAD_REQUEST, "config_error", msg.clone()),
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone()),
            Error::Io(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "io_error",
                err.to_string(),
            ),
            Error::Json(err) => (StatusCode::BAD_REQUEST, "json_error", err.to_string()),
            Error::Http(err) => (StatusCode::BAD_GATEWAY, "http_error", err.to_string()),
            Error::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
