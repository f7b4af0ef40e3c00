// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `HostHarvest` Fetch
//!
//! Page fetching and pagination for the `HostHarvest` tool.
//!
//! ## Components
//!
//! - [`source::PageSource`] - Trait for "fetch one page with these parameters"
//! - [`client::HttpPageFetcher`] - reqwest implementation (auth header, TLS
//!   toggle, timeout, retries on connection failures)
//! - [`cursor::next_cursor`] - Reads the next cursor from a page
//! - [`paginator::PaginatingClient`] - Lazy, sequential stream of pages
//! - [`cancel::CancelSignal`] - Stops pagination between pages
//!
//! ## Example
//!
//! ```ignore
//! use hostharvest_fetch::{FetchSettings, HttpPageFetcher, PaginatingClient};
//!
//! let settings = FetchSettings::from_config(&config)?;
//! let fetcher = HttpPageFetcher::new(&settings)?;
//! let client = PaginatingClient::new(fetcher, settings.pagination.clone())
//!     .with_deadline(settings.deadline);
//!
//! let pages = client.fetch_all().await?;
//! ```

pub mod cancel;
pub mod client;
pub mod cursor;
pub mod error;
pub mod paginator;
pub mod retry;
pub mod settings;
pub mod source;

// Re-export key types at crate root
pub use cancel::CancelSignal;
pub use client::HttpPageFetcher;
pub use cursor::next_cursor;
pub use error::FetchError;
pub use paginator::{PaginatingClient, PaginationConfig};
pub use retry::RetryPolicy;
pub use settings::{AuthHeader, FetchSettings};
pub use source::{PageSource, QueryParams};
