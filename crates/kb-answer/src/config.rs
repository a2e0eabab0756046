//! Configuration for the grounded answer service

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Service-level bearer authentication
    pub auth: ServiceAuthConfig,
    /// Discovery Engine search configuration
    pub discovery: DiscoveryConfig,
    /// Gemini generation configuration
    pub gemini: GeminiConfig,
    /// Pipeline pacing and search shape
    pub pipeline: PipelineConfig,
}

impl AppConfig {
    /// Resolve configuration from the process environment.
    ///
    /// Missing optional variables fall back to defaults; required variables
    /// are checked by [`AppConfig::validate`].
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            auth: ServiceAuthConfig::from_env(),
            discovery: DiscoveryConfig::from_env(),
            gemini: GeminiConfig::from_env(),
            pipeline: PipelineConfig::default(),
        }
    }

    /// Check that every required field is present
    pub fn validate(&self) -> Result<()> {
        if self.discovery.project_id.is_empty() {
            return Err(Error::Config(
                "GOOGLE_PROJECT_ID is required".to_string(),
            ));
        }
        if self.discovery.engine_id.is_empty() {
            return Err(Error::Config(
                "DISCOVERY_ENGINE_ID is required".to_string(),
            ));
        }
        if self.gemini.api_key.is_empty() {
            return Err(Error::Config("GEMINI_API_KEY is required".to_string()));
        }
        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            enable_cors: true,
        }
    }
}

impl ServerConfig {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_var("HOST").unwrap_or(defaults.host),
            port: env_var("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            enable_cors: defaults.enable_cors,
        }
    }
}

/// Shared-secret bearer authentication for the service itself.
///
/// Distinct from the cloud credential: this guards the inbound HTTP API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceAuthConfig {
    /// Expected bearer token on inbound requests
    pub api_key: String,
}

impl Default for ServiceAuthConfig {
    fn default() -> Self {
        Self {
            api_key: "hackrx-secret-key-2024".to_string(),
        }
    }
}

impl ServiceAuthConfig {
    fn from_env() -> Self {
        Self {
            api_key: env_var("API_SERVICE_KEY").unwrap_or_else(|| Self::default().api_key),
        }
    }
}

/// Discovery Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// GCP project ID hosting the engine
    pub project_id: String,
    /// Discovery Engine ID
    pub engine_id: String,
    /// Engine location (default: "global")
    #[serde(default = "default_location")]
    pub location: String,
    /// Engine collection (default: "default_collection")
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Inline service-account credentials (highest-priority source)
    #[serde(default)]
    pub service_account: Option<ServiceAccountConfig>,
    /// Path to a service-account key file (second-priority source)
    #[serde(default)]
    pub credentials_file: Option<PathBuf>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            engine_id: String::new(),
            location: default_location(),
            collection: default_collection(),
            service_account: None,
            credentials_file: None,
        }
    }
}

fn default_location() -> String {
    "global".to_string()
}

fn default_collection() -> String {
    "default_collection".to_string()
}

impl DiscoveryConfig {
    fn from_env() -> Self {
        Self {
            project_id: env_var("GOOGLE_PROJECT_ID").unwrap_or_default(),
            engine_id: env_var("DISCOVERY_ENGINE_ID").unwrap_or_default(),
            location: env_var("DISCOVERY_LOCATION").unwrap_or_else(default_location),
            collection: env_var("DISCOVERY_COLLECTION").unwrap_or_else(default_collection),
            service_account: ServiceAccountConfig::from_env(),
            credentials_file: env_var("GOOGLE_APPLICATION_CREDENTIALS").map(PathBuf::from),
        }
    }
}

/// Inline service-account identity supplied through configuration.
///
/// The private key may arrive with literal `\n` escapes when injected via an
/// environment variable; the credential provider un-escapes it before use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceAccountConfig {
    /// Service account email
    pub client_email: String,
    /// PEM-encoded private key
    pub private_key: String,
    /// Private key ID
    #[serde(default)]
    pub private_key_id: Option<String>,
    /// OAuth client ID
    #[serde(default)]
    pub client_id: Option<String>,
    /// Project the service account belongs to. When set, this project
    /// overrides the configured project for the rest of the run.
    #[serde(default)]
    pub project_id: Option<String>,
}

impl ServiceAccountConfig {
    /// Both the email and the private key must be present for this source
    /// to be considered at all.
    fn from_env() -> Option<Self> {
        let client_email = env_var("GOOGLE_SERVICE_ACCOUNT_EMAIL")?;
        let private_key = env_var("GOOGLE_SERVICE_ACCOUNT_PRIVATE_KEY")?;
        Some(Self {
            client_email,
            private_key,
            private_key_id: env_var("GOOGLE_SERVICE_ACCOUNT_PRIVATE_KEY_ID"),
            client_id: env_var("GOOGLE_SERVICE_ACCOUNT_CLIENT_ID"),
            project_id: env_var("GOOGLE_SERVICE_ACCOUNT_PROJECT_ID"),
        })
    }
}

/// Gemini generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key for the Generative Language API
    pub api_key: String,
    /// Model name
    pub model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Maximum output tokens
    pub max_output_tokens: u32,
    /// Nucleus sampling parameter
    pub top_p: f32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-2.0-flash".to_string(),
            temperature: 0.1,
            max_output_tokens: 2048,
            top_p: 0.85,
        }
    }
}

impl GeminiConfig {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: env_var("GEMINI_API_KEY").unwrap_or_default(),
            model: env_var("GEMINI_MODEL").unwrap_or(defaults.model),
            temperature: defaults.temperature,
            max_output_tokens: defaults.max_output_tokens,
            top_p: defaults.top_p,
        }
    }
}

/// Pipeline pacing and fixed search request shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Results requested per search call
    pub page_size: u32,
    /// Maximum extractive answers requested per document
    pub max_extractive_answers: u32,
    /// Maximum extractive segments requested per document
    pub max_extractive_segments: u32,
    /// Summary results requested
    pub summary_result_count: u32,
    /// Search request language code
    pub language_code: String,
    /// Timezone hint sent with search requests
    pub time_zone: String,
    /// Fixed delay between consecutive questions in a batch (milliseconds)
    pub pacing_delay_ms: u64,
    /// Timeout on the search call (seconds)
    pub search_timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            page_size: 5,
            max_extractive_answers: 3,
            max_extractive_segments: 1,
            summary_result_count: 3,
            language_code: "en-US".to_string(),
            time_zone: "Asia/Calcutta".to_string(),
            pacing_delay_ms: 100,
            search_timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.discovery.location, "global");
        assert_eq!(config.pipeline.page_size, 5);
        assert_eq!(config.pipeline.pacing_delay_ms, 100);
        assert_eq!(config.pipeline.search_timeout_secs, 30);
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_validate_requires_engine_and_key() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_err());

        config.discovery.project_id = "proj".to_string();
        config.discovery.engine_id = "engine".to_string();
        config.gemini.api_key = "key".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_discovery_config_deserializes_with_defaults() {
        let config: DiscoveryConfig =
            serde_json::from_str(r#"{"project_id":"p","engine_id":"e"}"#).unwrap();
        assert_eq!(config.location, "global");
        assert_eq!(config.collection, "default_collection");
        assert!(config.service_account.is_none());
    }
}
