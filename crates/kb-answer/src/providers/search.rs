//! Search provider trait

use async_trait::async_trait;

use crate::error::Result;
use crate::providers::credentials::Credential;
use crate::types::{SearchQuery, SearchResponse};

/// Trait for knowledge-base search backends
///
/// Implementations:
/// - `DiscoveryClient`: Google Discovery Engine serving config
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Issue one search call and return the raw structured response.
    ///
    /// The endpoint project is taken from the credential's resolved project
    /// id, keeping credentials and target resource in the same project.
    async fn search(&self, credential: &Credential, query: &SearchQuery)
        -> Result<SearchResponse>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
