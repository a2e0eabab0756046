//! Answer synthesis with refusal detection and normalization

use std::sync::Arc;

use crate::generation::prompt::PromptBuilder;
use crate::providers::llm::GenerativeModel;
use crate::types::answer::{Answer, ExtractedPassage};

/// Canonical refusal sentence returned for every out-of-knowledge-base case
pub const REFUSAL_ANSWER: &str =
    "The knowledge base doesn't contain specific information to answer this question.";

/// Refusal returned when no cloud credential could be acquired
pub const AUTH_UNAVAILABLE_ANSWER: &str =
    "The knowledge base is currently unavailable because the service could not authenticate with it. Please try again later.";

/// Chat reply when nothing in the knowledge base matches the message
pub const CHAT_NO_MATCH_REPLY: &str =
    "I can only provide information based on the specific knowledge base I have access to. Your question doesn't match any content in the knowledge base. Please ask questions related to the uploaded documents or try rephrasing your question.";

/// Canonical refusal substrings the model is instructed to emit. Matched
/// case-insensitively anywhere in the raw output.
const REFUSAL_MARKERS: [&str; 2] = ["knowledge base doesn't contain", "don't have information"];

/// Synthesizes a final answer from a question and an extracted passage,
/// constrained to that passage.
pub struct AnswerSynthesizer {
    model: Arc<dyn GenerativeModel>,
}

impl AnswerSynthesizer {
    /// Create a synthesizer over a generative model
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Produce the final answer for a question.
    ///
    /// A not-found passage short-circuits to the canonical refusal without a
    /// model call. A model error degrades to the raw passage text rather
    /// than failing the question.
    pub async fn synthesize(&self, question: &str, passage: &ExtractedPassage) -> Answer {
        if !passage.found {
            return Answer::refusal(REFUSAL_ANSWER);
        }

        let prompt = PromptBuilder::build_answer_prompt(question, &passage.text);
        match self.model.generate(&prompt).await {
            Ok(raw) => normalize(&raw),
            Err(err) => {
                tracing::warn!(
                    "Model call failed for question \"{}\": {}; falling back to raw passage",
                    question,
                    err
                );
                Answer::grounded(passage.text.clone())
            }
        }
    }

    /// Produce a conversational reply for a chat message. Same grounding
    /// contract as [`synthesize`](Self::synthesize) with the chat prompt and
    /// chat-flavored not-found reply.
    pub async fn chat_reply(&self, message: &str, passage: &ExtractedPassage) -> Answer {
        if !passage.found {
            return Answer::refusal(CHAT_NO_MATCH_REPLY);
        }

        let prompt = PromptBuilder::build_chat_prompt(message, &passage.text);
        match self.model.generate(&prompt).await {
            Ok(raw) => normalize(&raw),
            Err(err) => {
                tracing::warn!(
                    "Model call failed for chat message: {}; falling back to raw passage",
                    err
                );
                Answer::grounded(passage.text.clone())
            }
        }
    }
}

/// Replace any hedged or partial refusal with the one canonical refusal
/// sentence so callers see stable wording.
fn normalize(raw: &str) -> Answer {
    let lowered = raw.to_lowercase();
    if REFUSAL_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
    {
        Answer::refusal(REFUSAL_ANSWER)
    } else {
        Answer::grounded(raw.trim())
    }
}
