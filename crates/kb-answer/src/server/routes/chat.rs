//! Single-turn chat endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::server::state::AppState;

/// Inbound chat message. The timestamp is client-set and unused.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessage {
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Chat reply
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub timestamp: String,
}

/// POST /api/v1/chat - single-turn chat grounded in the knowledge base
pub async fn chat_message(
    State(state): State<AppState>,
    Json(message): Json<ChatMessage>,
) -> Result<Json<ChatResponse>> {
    if message.message.trim().is_empty() {
        return Err(Error::BadRequest("Message cannot be empty".to_string()));
    }

    let answer = state.pipeline().chat(&message.message).await;

    Ok(Json(ChatResponse {
        response: answer.text,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_deserializes_without_timestamp() {
        let message: ChatMessage = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert_eq!(message.message, "hi");
        assert!(message.timestamp.is_none());
    }
}
