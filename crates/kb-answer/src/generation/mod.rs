//! Answer synthesis under the context-only contract

pub mod prompt;
pub mod synthesizer;

pub use prompt::PromptBuilder;
pub use synthesizer::{AnswerSynthesizer, AUTH_UNAVAILABLE_ANSWER, REFUSAL_ANSWER};
