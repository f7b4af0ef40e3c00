//! Fetch settings derived from the run configuration.

use std::time::Duration;

use hostharvest_core::{CoreError, HarvestConfig};

use crate::paginator::PaginationConfig;
use crate::retry::RetryPolicy;

// ============================================================================
// Auth Header
// ============================================================================

/// The single authentication header sent with every request.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthHeader {
    /// Header name, e.g. `Authorization`.
    pub name: String,
    /// Header value, e.g. `Bearer ...`.
    pub value: String,
}

impl AuthHeader {
    /// Creates an auth header.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl std::fmt::Debug for AuthHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthHeader")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for talking to the listing endpoint.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Fully-qualified endpoint URL.
    pub endpoint: String,
    /// Authentication header, when a token is available.
    pub auth: Option<AuthHeader>,
    /// Whether TLS certificates are verified.
    pub verify_tls: bool,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retry policy for in-transit failures.
    pub retry: RetryPolicy,
    /// Cursor convention, if the endpoint paginates.
    pub pagination: PaginationConfig,
    /// Wall-clock budget for the whole pagination loop.
    pub deadline: Option<Duration>,
}

impl FetchSettings {
    /// Creates settings for a single unauthenticated page with defaults.
    pub fn new(endpoint: impl Into<String>) -> Self {
        let defaults = HarvestConfig::default();
        Self {
            endpoint: endpoint.into(),
            auth: None,
            verify_tls: defaults.verify_tls,
            timeout: Duration::from_secs(defaults.timeout_secs),
            retry: RetryPolicy::default(),
            pagination: PaginationConfig::single_page(),
            deadline: None,
        }
    }

    /// Builds settings from a validated configuration.
    ///
    /// The token is resolved from the literal value or the configured
    /// environment variable; without one, no auth header is sent.
    pub fn from_config(config: &HarvestConfig) -> Result<Self, CoreError> {
        let endpoint = config
            .endpoint
            .clone()
            .ok_or_else(|| CoreError::InvalidConfig("endpoint is required".to_string()))?;

        let auth = config
            .resolve_token()
            .map(|token| AuthHeader::new(config.auth_header.clone(), token));

        Ok(Self {
            endpoint,
            auth,
            verify_tls: config.verify_tls,
            timeout: Duration::from_secs(config.timeout_secs),
            retry: RetryPolicy::new(config.attempts),
            pagination: PaginationConfig::from_config(config)?,
            deadline: config.deadline_secs.map(Duration::from_secs),
        })
    }

    /// Sets the auth header.
    pub fn with_auth(mut self, auth: AuthHeader) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Sets the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the pagination convention.
    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }
}
