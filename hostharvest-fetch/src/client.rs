//! HTTP page fetcher.

use async_trait::async_trait;
use hostharvest_core::Page;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Client, Response};
use tracing::{debug, instrument, warn};

use crate::error::FetchError;
use crate::retry::RetryPolicy;
use crate::settings::{AuthHeader, FetchSettings};
use crate::source::PageSource;

/// User agent string for `HostHarvest`.
const USER_AGENT: &str = concat!("hostharvest/", env!("CARGO_PKG_VERSION"));

/// Fetches pages from the listing endpoint with one GET per page.
///
/// The underlying connection pool is reused across pages.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    inner: Client,
    endpoint: String,
    headers: HeaderMap,
    retry: RetryPolicy,
    timeout_secs: u64,
}

impl HttpPageFetcher {
    /// Creates a fetcher from settings.
    ///
    /// Fails if the auth header cannot be encoded or the TLS backend cannot
    /// be initialized.
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        let inner = Client::builder()
            .timeout(settings.timeout)
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(!settings.verify_tls)
            .build()
            .map_err(|e| FetchError::Setup(e.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(auth) = &settings.auth {
            let (name, value) = encode_auth(auth)?;
            headers.insert(name, value);
        }

        Ok(Self {
            inner,
            endpoint: settings.endpoint.clone(),
            headers,
            retry: settings.retry.clone(),
            timeout_secs: settings.timeout.as_secs(),
        })
    }

    /// Returns the endpoint this fetcher talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn read_page(response: Response) -> Result<Page, FetchError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                debug!(status = %status, error = %e, "Error body unreadable");
                String::new()
            });
            return Err(FetchError::status(status.as_u16(), &body));
        }

        let body = response.text().await?;
        debug!(status = %status, bytes = body.len(), "Response received");

        serde_json::from_str(&body)
            .map_err(|e| FetchError::InvalidResponse(format!("body is not JSON: {e}")))
    }
}

fn encode_auth(auth: &AuthHeader) -> Result<(HeaderName, HeaderValue), FetchError> {
    let name = HeaderName::from_bytes(auth.name.trim().as_bytes())
        .map_err(|e| FetchError::InvalidHeader(format!("{}: {e}", auth.name)))?;
    let mut value = HeaderValue::from_str(auth.value.trim())
        .map_err(|e| FetchError::InvalidHeader(format!("value for {name}: {e}")))?;
    value.set_sensitive(true);
    Ok((name, value))
}

#[async_trait]
impl PageSource for HttpPageFetcher {
    fn describe(&self) -> String {
        self.endpoint.clone()
    }

    #[instrument(skip(self, params), fields(url = %self.endpoint))]
    async fn fetch_page(&self, params: &[(String, String)]) -> Result<Page, FetchError> {
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(attempt, params = ?params, "GET page");

            let result = self
                .inner
                .get(&self.endpoint)
                .headers(self.headers.clone())
                .query(params)
                .send()
                .await;

            match result {
                Ok(response) => return Self::read_page(response).await,
                Err(e) if RetryPolicy::is_retryable(&e) && self.retry.allows_another(attempt) => {
                    let delay = self.retry.delay_after(attempt);
                    warn!(
                        error = %e,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) if e.is_timeout() => return Err(FetchError::Timeout(self.timeout_secs)),
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_with_auth_header() {
        let settings = FetchSettings::new("https://example.com/api")
            .with_auth(AuthHeader::new("Netskope-Api-Token", "abc"));
        let fetcher = HttpPageFetcher::new(&settings).unwrap();
        assert_eq!(fetcher.endpoint(), "https://example.com/api");
        assert_eq!(fetcher.describe(), "https://example.com/api");
        let value = fetcher.headers.get("netskope-api-token").unwrap();
        assert!(value.is_sensitive());
        assert_eq!(value.to_str().unwrap(), "abc");
    }

    #[test]
    fn test_invalid_header_name_rejected() {
        let settings = FetchSettings::new("https://example.com/api")
            .with_auth(AuthHeader::new("bad header", "abc"));
        let err = HttpPageFetcher::new(&settings).unwrap_err();
        assert!(matches!(err, FetchError::InvalidHeader(_)));
    }

    #[test]
    fn test_invalid_header_value_rejected() {
        let settings = FetchSettings::new("https://example.com/api")
            .with_auth(AuthHeader::new("Authorization", "line\nbreak"));
        let err = HttpPageFetcher::new(&settings).unwrap_err();
        assert!(matches!(err, FetchError::InvalidHeader(_)));
    }

    #[test]
    fn test_insecure_mode_builds() {
        let mut settings = FetchSettings::new("https://self-signed.internal/api");
        settings.verify_tls = false;
        assert!(HttpPageFetcher::new(&settings).is_ok());
    }
}
