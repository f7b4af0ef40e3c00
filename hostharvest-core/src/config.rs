//! Run configuration.
//!
//! The configuration is read once per run from a JSON file (missing file
//! means defaults), overlaid with command-line flags by the CLI, validated,
//! and then passed by reference to every stage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::CoreError;
use crate::keys::KeySet;

/// Default authentication header name.
pub const DEFAULT_AUTH_HEADER: &str = "Netskope-Api-Token";

/// Default environment variable holding the API token.
pub const DEFAULT_TOKEN_ENV: &str = "HOSTHARVEST_API_TOKEN";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts per page on connection failures and timeouts.
pub const DEFAULT_ATTEMPTS: u32 = 3;

// ============================================================================
// Harvest Config
// ============================================================================

/// Configuration for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Fully-qualified URL of the listing endpoint.
    pub endpoint: Option<String>,
    /// Name of the authentication header.
    pub auth_header: String,
    /// Literal authentication header value. Takes precedence over the env var.
    pub auth_token: Option<String>,
    /// Environment variable consulted when no literal token is configured.
    pub auth_token_env: String,
    /// Whether TLS certificates are verified.
    pub verify_tls: bool,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Attempts per page when the connection fails or times out.
    pub attempts: u32,
    /// Query parameter that carries the cursor on follow-up requests.
    pub cursor_param: Option<String>,
    /// Dot-delimited path to the next cursor inside each page.
    pub cursor_path: Option<String>,
    /// Static page-size parameter, as `key=value`.
    pub per_page: Option<String>,
    /// Optional wall-clock budget for the whole pagination loop, in seconds.
    pub deadline_secs: Option<u64>,
    /// Candidate key lists used by the extraction engine.
    pub keys: KeySet,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            auth_header: DEFAULT_AUTH_HEADER.to_string(),
            auth_token: None,
            auth_token_env: DEFAULT_TOKEN_ENV.to_string(),
            verify_tls: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            attempts: DEFAULT_ATTEMPTS,
            cursor_param: None,
            cursor_path: None,
            per_page: None,
            deadline_secs: None,
            keys: KeySet::default(),
        }
    }
}

impl HarvestConfig {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hostharvest")
            .join("config.json")
    }

    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, CoreError> {
        Self::load_from(&Self::default_path())
    }

    /// Loads configuration from a specific path.
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: HarvestConfig = serde_json::from_str(&content)?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// `require_endpoint` is set for runs that talk to the API; file-only
    /// runs never need an endpoint.
    pub fn validate(&self, require_endpoint: bool) -> Result<(), CoreError> {
        match self.endpoint.as_deref() {
            Some(endpoint) => {
                let url = Url::parse(endpoint).map_err(|e| {
                    CoreError::InvalidConfig(format!("endpoint '{endpoint}' is not a URL: {e}"))
                })?;
                if !matches!(url.scheme(), "http" | "https") {
                    return Err(CoreError::InvalidConfig(format!(
                        "endpoint must use http or https, got '{}'",
                        url.scheme()
                    )));
                }
            }
            None if require_endpoint => {
                return Err(CoreError::InvalidConfig("endpoint is required".to_string()));
            }
            None => {}
        }

        if self.timeout_secs == 0 {
            return Err(CoreError::InvalidConfig("timeout_secs must be > 0".to_string()));
        }

        if self.attempts == 0 {
            return Err(CoreError::InvalidConfig("attempts must be >= 1".to_string()));
        }

        if self.auth_header.trim().is_empty() {
            return Err(CoreError::InvalidConfig("auth_header must not be empty".to_string()));
        }

        self.per_page_param()?;

        let has_param = self.cursor_param.as_deref().is_some_and(|p| !p.is_empty());
        let has_path = self.cursor_path().is_some();
        if has_param != has_path {
            warn!(
                cursor_param = ?self.cursor_param,
                cursor_path = ?self.cursor_path,
                "Pagination needs both cursor_param and cursor_path; fetching a single page"
            );
        }

        Ok(())
    }

    /// Returns the parsed cursor path, if one is configured and non-empty.
    pub fn cursor_path(&self) -> Option<CursorPath> {
        self.cursor_path.as_deref().and_then(CursorPath::parse)
    }

    /// Returns the parsed page-size parameter, if configured.
    pub fn per_page_param(&self) -> Result<Option<PerPageParam>, CoreError> {
        self.per_page.as_deref().map(str::parse).transpose()
    }

    /// Resolves the authentication header value.
    ///
    /// A literal token wins; otherwise the configured environment variable
    /// is read. Returns `None` when neither yields a non-empty value.
    pub fn resolve_token(&self) -> Option<String> {
        self.auth_token
            .clone()
            .or_else(|| std::env::var(&self.auth_token_env).ok())
            .filter(|token| !token.trim().is_empty())
    }

    /// Returns a copy that is safe to print: the literal token is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.auth_token.is_some() {
            copy.auth_token = Some("********".to_string());
        }
        copy
    }
}

// ============================================================================
// Cursor Path
// ============================================================================

/// An ordered sequence of object keys leading to the next-page cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorPath(Vec<String>);

impl CursorPath {
    /// Parses a dot-delimited path such as `meta.next`.
    ///
    /// Empty segments are dropped; a path with no segments yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let keys: Vec<String> = raw
            .split('.')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(String::from)
            .collect();
        if keys.is_empty() { None } else { Some(Self(keys)) }
    }

    /// Creates a path from already-split keys.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    /// Returns the keys in walk order.
    pub fn keys(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for CursorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

// ============================================================================
// Per-Page Parameter
// ============================================================================

/// A static query parameter sent with every request, e.g. `limit=1000`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerPageParam {
    /// Query parameter name.
    pub key: String,
    /// Query parameter value.
    pub value: String,
}

impl FromStr for PerPageParam {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s.split_once('=').ok_or_else(|| {
            CoreError::InvalidConfig(format!("per_page must look like key=value, got '{s}'"))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(CoreError::InvalidConfig(format!(
                "per_page has an empty parameter name: '{s}'"
            )));
        }
        Ok(Self {
            key: key.to_string(),
            value: value.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_endpoint(endpoint: &str) -> HarvestConfig {
        HarvestConfig {
            endpoint: Some(endpoint.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = HarvestConfig::default();
        assert_eq!(config.auth_header, "Netskope-Api-Token");
        assert!(config.verify_tls);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.cursor_path().is_none());
    }

    #[test]
    fn test_cursor_path_parsing() {
        let path = CursorPath::parse("meta.next").unwrap();
        assert_eq!(path.keys(), ["meta".to_string(), "next".to_string()]);
        assert_eq!(path.to_string(), "meta.next");

        let path = CursorPath::parse(" meta..next. ").unwrap();
        assert_eq!(path.keys().len(), 2);

        assert!(CursorPath::parse("").is_none());
        assert!(CursorPath::parse("...").is_none());
    }

    #[test]
    fn test_per_page_parsing() {
        let param: PerPageParam = "limit=1000".parse().unwrap();
        assert_eq!(param.key, "limit");
        assert_eq!(param.value, "1000");

        assert!("limit".parse::<PerPageParam>().is_err());
        assert!("=5".parse::<PerPageParam>().is_err());
    }

    #[test]
    fn test_validate_requires_endpoint_only_when_asked() {
        let config = HarvestConfig::default();
        assert!(config.validate(false).is_ok());
        assert!(config.validate(true).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_endpoint() {
        assert!(with_endpoint("not a url").validate(true).is_err());
        assert!(with_endpoint("ftp://example.com/x").validate(true).is_err());
        assert!(with_endpoint("https://tenant.example.com/api/v2/apps").validate(true).is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout_and_bad_per_page() {
        let mut config = with_endpoint("https://example.com");
        config.timeout_secs = 0;
        assert!(config.validate(true).is_err());

        let mut config = with_endpoint("https://example.com");
        config.per_page = Some("oops".to_string());
        assert!(config.validate(true).is_err());
    }

    #[test]
    fn test_literal_token_wins() {
        let config = HarvestConfig {
            auth_token: Some("abc".to_string()),
            auth_token_env: "HOSTHARVEST_TEST_UNSET_VARIABLE".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_missing_token_is_none() {
        let config = HarvestConfig {
            auth_token_env: "HOSTHARVEST_TEST_UNSET_VARIABLE".to_string(),
            ..Default::default()
        };
        assert!(config.resolve_token().is_none());
    }

    #[test]
    fn test_redacted_masks_token() {
        let config = HarvestConfig {
            auth_token: Some("secret".to_string()),
            ..Default::default()
        };
        assert_eq!(config.redacted().auth_token.as_deref(), Some("********"));
        assert!(HarvestConfig::default().redacted().auth_token.is_none());
    }
}
