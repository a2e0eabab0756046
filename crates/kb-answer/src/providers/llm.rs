//! Generative model trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for single-shot prompt completion
///
/// Implementations:
/// - `GeminiClient`: Generative Language API (gemini-2.0-flash)
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Run one prompt-completion call and return the raw model text
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// The model being used
    fn model(&self) -> &str;
}
