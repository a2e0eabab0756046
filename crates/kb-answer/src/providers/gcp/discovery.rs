//! Discovery Engine search client
//!
//! Issues search calls against the pre-trained serving config. The request
//! shape is fixed: query expansion and spell correction stay automatic, the
//! extractive and summary counts come from configuration, and the endpoint
//! project is taken from the credential so it always matches the identity
//! making the call.

use async_trait::async_trait;
use std::time::Duration;

use crate::config::{DiscoveryConfig, PipelineConfig};
use crate::error::{Error, Result};
use crate::providers::credentials::Credential;
use crate::providers::search::SearchProvider;
use crate::types::{SearchQuery, SearchResponse};

const DISCOVERY_HOST: &str = "https://discoveryengine.googleapis.com";

/// Discovery Engine search client
pub struct DiscoveryClient {
    client: reqwest::Client,
    location: String,
    collection: String,
    engine_id: String,
    max_extractive_answers: u32,
    max_extractive_segments: u32,
    summary_result_count: u32,
    time_zone: String,
    timeout: Duration,
}

impl DiscoveryClient {
    /// Create a new search client
    pub fn new(discovery: &DiscoveryConfig, pipeline: &PipelineConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            location: discovery.location.clone(),
            collection: discovery.collection.clone(),
            engine_id: discovery.engine_id.clone(),
            max_extractive_answers: pipeline.max_extractive_answers,
            max_extractive_segments: pipeline.max_extractive_segments,
            summary_result_count: pipeline.summary_result_count,
            time_zone: pipeline.time_zone.clone(),
            timeout: Duration::from_secs(pipeline.search_timeout_secs),
        }
    }

    /// Serving-config search endpoint for the resolved project
    fn endpoint(&self, project_id: &str) -> String {
        format!(
            "{}/v1alpha/projects/{}/locations/{}/collections/{}/engines/{}/servingConfigs/default_search:search",
            DISCOVERY_HOST, project_id, self.location, self.collection, self.engine_id
        )
    }

    fn build_request(&self, query: &SearchQuery) -> SearchRequestBody {
        SearchRequestBody {
            query: query.text.clone(),
            page_size: query.page_size,
            query_expansion_spec: QueryExpansionSpec { condition: "AUTO" },
            spell_correction_spec: SpellCorrectionSpec { mode: "AUTO" },
            language_code: query.locale.clone(),
            content_search_spec: ContentSearchSpec {
                extractive_content_spec: ExtractiveContentSpec {
                    max_extractive_answer_count: self.max_extractive_answers,
                    max_extractive_segment_count: self.max_extractive_segments,
                    return_extractive_segment_score: true,
                },
                summary_spec: SummarySpec {
                    summary_result_count: self.summary_result_count,
                    include_citations: true,
                },
            },
            user_info: UserInfo {
                time_zone: self.time_zone.clone(),
            },
            session: query.session.clone(),
        }
    }
}

#[async_trait]
impl SearchProvider for DiscoveryClient {
    async fn search(
        &self,
        credential: &Credential,
        query: &SearchQuery,
    ) -> Result<SearchResponse> {
        let endpoint = self.endpoint(credential.project_id());
        let body = self.build_request(query);

        tracing::debug!("Searching Discovery Engine: \"{}\"", query.text);

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(credential.bearer())
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::SearchTimeout(self.timeout.as_secs())
                } else {
                    Error::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Discovery Engine returned {}: {}", status, body);
            return Err(Error::SearchStatus {
                status: status.as_u16(),
            });
        }

        let search_response: SearchResponse = response
            .json()
            .await
            .map_err(|e| Error::Internal(format!("Failed to parse search response: {}", e)))?;

        tracing::debug!(
            "Discovery Engine returned {} result(s), summary: {}",
            search_response.results.len(),
            search_response.summary.is_some()
        );

        Ok(search_response)
    }

    fn name(&self) -> &str {
        "discovery-engine"
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequestBody {
    query: String,
    page_size: u32,
    query_expansion_spec: QueryExpansionSpec,
    spell_correction_spec: SpellCorrectionSpec,
    language_code: String,
    content_search_spec: ContentSearchSpec,
    user_info: UserInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    session: Option<String>,
}

#[derive(serde::Serialize)]
struct QueryExpansionSpec {
    condition: &'static str,
}

#[derive(serde::Serialize)]
struct SpellCorrectionSpec {
    mode: &'static str,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentSearchSpec {
    extractive_content_spec: ExtractiveContentSpec,
    summary_spec: SummarySpec,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtractiveContentSpec {
    max_extractive_answer_count: u32,
    max_extractive_segment_count: u32,
    return_extractive_segment_score: bool,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct SummarySpec {
    summary_result_count: u32,
    include_citations: bool,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct UserInfo {
    time_zone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> DiscoveryClient {
        let discovery = DiscoveryConfig {
            project_id: "configured-project".to_string(),
            engine_id: "policy-engine".to_string(),
            ..Default::default()
        };
        DiscoveryClient::new(&discovery, &PipelineConfig::default())
    }

    #[test]
    fn test_endpoint_uses_resolved_project() {
        let client = test_client();
        let endpoint = client.endpoint("resolved-project");
        assert_eq!(
            endpoint,
            "https://discoveryengine.googleapis.com/v1alpha/projects/resolved-project/locations/global/collections/default_collection/engines/policy-engine/servingConfigs/default_search:search"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let client = test_client();
        let query = SearchQuery::new("What is the grace period?");
        let body = serde_json::to_value(client.build_request(&query)).unwrap();

        assert_eq!(body["query"], "What is the grace period?");
        assert_eq!(body["pageSize"], 5);
        assert_eq!(body["queryExpansionSpec"]["condition"], "AUTO");
        assert_eq!(body["spellCorrectionSpec"]["mode"], "AUTO");
        assert_eq!(body["languageCode"], "en-US");
        assert_eq!(
            body["contentSearchSpec"]["extractiveContentSpec"]["maxExtractiveAnswerCount"],
            3
        );
        assert_eq!(
            body["contentSearchSpec"]["extractiveContentSpec"]["maxExtractiveSegmentCount"],
            1
        );
        assert_eq!(body["contentSearchSpec"]["summarySpec"]["includeCitations"], true);
        assert_eq!(body["userInfo"]["timeZone"], "Asia/Calcutta");
        assert!(body.get("session").is_none());
    }

    #[test]
    fn test_request_body_carries_session() {
        let client = test_client();
        let query = SearchQuery::new("renewal terms").with_session("sessions/42");
        let body = serde_json::to_value(client.build_request(&query)).unwrap();
        assert_eq!(body["session"], "sessions/42");
    }
}
