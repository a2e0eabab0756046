//! Application state for the answer server

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::Result;
use crate::generation::AnswerSynthesizer;
use crate::pipeline::Pipeline;
use crate::providers::gcp::{DiscoveryClient, GcpCredentials, GeminiClient};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AppConfig,
    /// The grounded answer pipeline
    pipeline: Pipeline,
}

impl AppState {
    /// Create new application state with the GCP providers wired in
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;

        tracing::info!(
            "Initializing answer pipeline (project: {}, engine: {}, location: {})",
            config.discovery.project_id,
            config.discovery.engine_id,
            config.discovery.location
        );

        let credentials = Arc::new(GcpCredentials::new(&config.discovery));
        let search = Arc::new(DiscoveryClient::new(&config.discovery, &config.pipeline));
        let model = Arc::new(GeminiClient::new(&config.gemini));
        tracing::info!("Generation model: {}", config.gemini.model);

        let synthesizer = AnswerSynthesizer::new(model);
        let pipeline = Pipeline::new(credentials, search, synthesizer, &config.pipeline);

        Ok(Self {
            inner: Arc::new(AppStateInner { config, pipeline }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get the answer pipeline
    pub fn pipeline(&self) -> &Pipeline {
        &self.inner.pipeline
    }

    /// Expected bearer token for inbound requests
    pub fn service_api_key(&self) -> &str {
        &self.inner.config.auth.api_key
    }
}
