//! Extracted passage and final answer types

use serde::{Deserialize, Serialize};

/// The single best plain-text passage pulled out of a search response.
///
/// `found == false` is a distinguished sentinel: the text is empty and the
/// passage must not be used for grounding. A found passage is never blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedPassage {
    /// Passage text, trimmed
    pub text: String,
    /// Whether any cascade stage produced usable content
    pub found: bool,
}

impl ExtractedPassage {
    /// A passage with usable content. The text is trimmed here so the
    /// found/blank invariant holds by construction.
    pub fn found(text: impl Into<String>) -> Self {
        Self {
            text: text.into().trim().to_string(),
            found: true,
        }
    }

    /// The "no relevant content" sentinel
    pub fn not_found() -> Self {
        Self {
            text: String::new(),
            found: false,
        }
    }
}

/// A final answer for one question.
///
/// `grounded == false` marks an explicit out-of-knowledge-base refusal or a
/// degraded failure answer; the text is still natural language either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Answer text
    pub text: String,
    /// Whether the answer derives from retrieved context
    pub grounded: bool,
}

impl Answer {
    /// An answer grounded in retrieved context
    pub fn grounded(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            grounded: true,
        }
    }

    /// A refusal or degraded answer that is not grounded in context
    pub fn refusal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            grounded: false,
        }
    }
}
