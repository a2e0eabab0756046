//! Batch question endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::server::state::AppState;

/// Batch question request. The document reference is accepted for wire
/// compatibility and ignored: the knowledge base is pre-built upstream.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRequest {
    #[serde(default)]
    pub documents: String,
    pub questions: Vec<String>,
}

/// Ordered answers, one per input question
#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub answers: Vec<String>,
}

/// POST /api/v1/hackrx/run - answer a batch of questions from the knowledge base
pub async fn run_questions(
    State(state): State<AppState>,
    Json(request): Json<QuestionRequest>,
) -> Result<Json<QuestionResponse>> {
    if request.questions.is_empty() {
        return Err(Error::BadRequest(
            "At least one question is required".to_string(),
        ));
    }

    let start = Instant::now();
    tracing::info!("Answering batch of {} question(s)", request.questions.len());

    let answers = state.pipeline().run(&request.questions).await;

    tracing::info!(
        "Batch completed in {}ms ({} grounded / {} total)",
        start.elapsed().as_millis(),
        answers.iter().filter(|a| a.grounded).count(),
        answers.len()
    );

    Ok(Json(QuestionResponse {
        answers: answers.into_iter().map(|answer| answer.text).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes_without_documents() {
        let request: QuestionRequest =
            serde_json::from_str(r#"{"questions": ["What is covered?"]}"#).unwrap();
        assert!(request.documents.is_empty());
        assert_eq!(request.questions.len(), 1);
    }
}
