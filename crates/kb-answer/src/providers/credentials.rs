//! Cloud credential provider trait and credential type

use async_trait::async_trait;
use std::time::Instant;

use crate::error::Result;

/// Which source yielded the credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Inline service-account fields from configuration
    EnvServiceAccount,
    /// Service-account key file on disk
    FileServiceAccount,
    /// Ambient application-default credentials
    AmbientDefault,
}

/// A resolved cloud credential, acquired once per request batch.
///
/// Carries the resolved project id alongside the token: when the inline
/// service-account source names its own project, that project replaces the
/// configured one, and callers build the search endpoint from this field
/// rather than from shared configuration.
#[derive(Debug, Clone)]
pub struct Credential {
    token: String,
    project_id: String,
    expires_at: Instant,
    source: CredentialSource,
}

impl Credential {
    /// Create a credential from a freshly exchanged token
    pub fn new(
        token: String,
        project_id: String,
        expires_at: Instant,
        source: CredentialSource,
    ) -> Self {
        Self {
            token,
            project_id,
            expires_at,
            source,
        }
    }

    /// The opaque bearer token
    pub fn bearer(&self) -> &str {
        &self.token
    }

    /// The resolved project id for this run
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// When the token stops being usable
    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// Which source produced this credential
    pub fn source(&self) -> CredentialSource {
        self.source
    }
}

/// Resolves a cloud access token from one of several credential sources.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Acquire a credential, trying each source in priority order.
    ///
    /// Fails with `Error::Auth` when no source yields a usable token; the
    /// caller treats that as fatal for the whole batch.
    async fn acquire(&self) -> Result<Credential>;
}
