//! Extraction cascade over the Discovery Engine response
//!
//! The response schema is sparse and inconsistently populated: the summary
//! may be absent, extractive answers may be absent, derived-structure fields
//! may be absent, and generic struct data may use any of several field names.
//! Extraction therefore walks an ordered cascade of stages, each a pure
//! function over the response; a stage is only consulted when every earlier
//! stage yielded nothing usable. The order is a confidence ranking and the
//! first non-blank match wins, even when a later stage would have richer
//! text.

use serde_json::Value;

use crate::types::answer::ExtractedPassage;
use crate::types::search::{ResultDocument, SearchResponse};

/// Ordered candidate field names probed inside generic struct data
const STRUCT_DATA_FIELDS: &[&str] = &["content", "text", "description", "body"];

/// The cascade, highest confidence first
const STAGES: &[(&str, fn(&SearchResponse) -> Option<String>)] = &[
    ("summary", summary_text),
    ("extractive_answer", document_extractive_answer),
    ("derived_extractive_answer", derived_extractive_answer),
    ("derived_snippet", derived_snippet),
    ("struct_data", struct_data_field),
];

/// Walk the cascade and return the single best plain-text passage, or the
/// not-found sentinel when every stage is exhausted across all result items.
pub fn extract(response: &SearchResponse) -> ExtractedPassage {
    for (stage, probe) in STAGES {
        if let Some(text) = probe(response) {
            tracing::debug!("Extraction stage \"{}\" matched", stage);
            return ExtractedPassage::found(text);
        }
    }

    tracing::debug!("No extractable content in search response");
    ExtractedPassage::not_found()
}

/// Trimmed, non-empty text or nothing. Whitespace-only content counts as
/// absent everywhere in the cascade.
fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn documents(response: &SearchResponse) -> impl Iterator<Item = &ResultDocument> {
    response
        .results
        .iter()
        .filter_map(|result| result.document.as_ref())
}

/// Stage 1: cross-result summary text
fn summary_text(response: &SearchResponse) -> Option<String> {
    response
        .summary
        .as_ref()
        .and_then(|summary| summary.summary_text.as_deref())
        .and_then(non_blank)
}

/// Stage 2: direct extractive answers on the result documents
fn document_extractive_answer(response: &SearchResponse) -> Option<String> {
    documents(response)
        .flat_map(|document| document.extractive_answers.iter())
        .filter_map(|answer| answer.content.as_deref())
        .find_map(non_blank)
}

/// Stage 3: extractive answers inside the derived-structure block
fn derived_extractive_answer(response: &SearchResponse) -> Option<String> {
    documents(response)
        .filter_map(|document| document.derived_struct_data.as_ref())
        .flat_map(|derived| derived.extractive_answers.iter())
        .filter_map(|answer| answer.content.as_deref())
        .find_map(non_blank)
}

/// Stage 4: snippets inside the derived-structure block
fn derived_snippet(response: &SearchResponse) -> Option<String> {
    documents(response)
        .filter_map(|document| document.derived_struct_data.as_ref())
        .flat_map(|derived| derived.snippets.iter())
        .filter_map(|snippet| snippet.snippet.as_deref())
        .find_map(non_blank)
}

/// Stage 5: generic struct data, probed field by field in a fixed order
fn struct_data_field(response: &SearchResponse) -> Option<String> {
    documents(response)
        .filter_map(|document| document.struct_data.as_ref())
        .filter_map(|data| data.as_object())
        .find_map(|fields| {
            STRUCT_DATA_FIELDS
                .iter()
                .filter_map(|name| fields.get(*name))
                .find_map(scalar_text)
        })
}

/// Render a scalar JSON value as text; objects, arrays, and nulls carry no
/// usable passage.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_blank(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
