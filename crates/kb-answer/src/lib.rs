//! kb-answer: grounded Q&A over a pre-trained Discovery Engine knowledge base
//!
//! This crate answers natural-language questions strictly from an enterprise
//! knowledge base. Candidate passages are retrieved from a managed Discovery
//! Engine index, then a final answer is synthesized with Gemini under a
//! context-only contract: if the retrieved passage cannot support an answer,
//! the service refuses instead of falling back on general model knowledge.

pub mod config;
pub mod error;
pub mod generation;
pub mod pipeline;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use pipeline::Pipeline;
pub use types::{
    answer::{Answer, ExtractedPassage},
    query::SearchQuery,
    search::SearchResponse,
};
