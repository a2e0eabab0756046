//! Discovery Engine search response types
//!
//! The upstream schema is sparse and inconsistently populated, so every
//! field here is optional and unknown fields are ignored. The extraction
//! cascade in `retrieval::extract` decides which of these fields to trust.

use serde::Deserialize;
use serde_json::Value;

/// Raw search response from the Discovery Engine
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Result items, possibly empty or absent
    #[serde(default)]
    pub results: Vec<SearchResult>,

    /// Cross-result summary block
    #[serde(default)]
    pub summary: Option<Summary>,

    /// Total matching document count reported by the engine
    #[serde(default)]
    pub total_size: Option<u64>,
}

/// One result item
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Result ID
    #[serde(default)]
    pub id: Option<String>,

    /// The matched document payload
    #[serde(default)]
    pub document: Option<ResultDocument>,
}

/// Document payload inside a result item
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDocument {
    /// Document resource name
    #[serde(default)]
    pub name: Option<String>,

    /// Direct extractive answers
    #[serde(default)]
    pub extractive_answers: Vec<ExtractiveAnswer>,

    /// Engine-derived structure (extractive answers, snippets)
    #[serde(default)]
    pub derived_struct_data: Option<DerivedStructData>,

    /// Free-form structured data with no fixed schema
    #[serde(default)]
    pub struct_data: Option<Value>,
}

/// Derived-structure block. The engine emits these keys in snake_case,
/// unlike the camelCase of the surrounding schema.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DerivedStructData {
    /// Extractive answers derived by the engine
    #[serde(default)]
    pub extractive_answers: Vec<ExtractiveAnswer>,

    /// Snippets derived by the engine
    #[serde(default)]
    pub snippets: Vec<Snippet>,
}

/// One extractive answer
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractiveAnswer {
    /// Verbatim answer content
    #[serde(default)]
    pub content: Option<String>,

    /// Page the answer was extracted from
    #[serde(default)]
    pub page_number: Option<String>,
}

/// One snippet
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    /// Snippet text
    #[serde(default)]
    pub snippet: Option<String>,

    /// Whether the engine considered the snippet usable
    #[serde(default)]
    pub snippet_status: Option<String>,
}

/// Cross-result summary block
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Summary text spanning multiple results
    #[serde(default)]
    pub summary_text: Option<String>,
}
