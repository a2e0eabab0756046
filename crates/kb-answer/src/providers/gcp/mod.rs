//! Google Cloud provider implementations
//!
//! - service-account / ambient credential resolution with OAuth token exchange
//! - Discovery Engine search over the pre-trained serving config
//! - Gemini answer generation via the Generative Language API

mod auth;
mod discovery;
mod gemini;

pub use auth::GcpCredentials;
pub use discovery::DiscoveryClient;
pub use gemini::GeminiClient;
