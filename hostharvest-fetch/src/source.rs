//! Page source trait.
//!
//! A page source performs exactly one request for one page. The paginating
//! client decides the query parameters; the source only sends them.

use async_trait::async_trait;
use hostharvest_core::Page;

use crate::error::FetchError;

/// Query parameters for one page request, in send order.
pub type QueryParams = Vec<(String, String)>;

/// Something that can fetch one page of JSON.
///
/// ## Implementing a Source
///
/// ```ignore
/// struct Canned(Vec<Page>);
///
/// #[async_trait]
/// impl PageSource for Canned {
///     fn describe(&self) -> String {
///         "canned".to_string()
///     }
///
///     async fn fetch_page(&self, _params: &[(String, String)]) -> Result<Page, FetchError> {
///         Ok(self.0[0].clone())
///     }
/// }
/// ```
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Short description used in log events (usually the endpoint URL).
    fn describe(&self) -> String;

    /// Fetches one page with the given query parameters.
    ///
    /// Any non-success outcome is a [`FetchError`]; there is no partial page.
    async fn fetch_page(&self, params: &[(String, String)]) -> Result<Page, FetchError>;
}
