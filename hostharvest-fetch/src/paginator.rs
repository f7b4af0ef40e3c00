//! Cursor-driven pagination.
//!
//! The paginating client turns a [`PageSource`] into a lazy, strictly
//! sequential stream of pages: the parameters of page N+1 depend on the
//! cursor found in page N, so pages are never requested concurrently.
//!
//! There is no page-count cap. An endpoint that always returns a non-empty
//! cursor keeps the loop going until the cancel signal fires or the optional
//! deadline passes.

use std::time::{Duration, Instant};

use futures::stream::{self, Stream, TryStreamExt};
use hostharvest_core::{CoreError, CursorPath, HarvestConfig, Page, PerPageParam};
use tracing::{debug, info, instrument};

use crate::cancel::CancelSignal;
use crate::cursor::next_cursor;
use crate::error::FetchError;
use crate::source::{PageSource, QueryParams};

// ============================================================================
// Pagination Config
// ============================================================================

/// The cursor convention of an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Query parameter that carries the cursor on follow-up requests.
    pub cursor_param: Option<String>,
    /// Where the next cursor lives inside each page.
    pub cursor_path: Option<CursorPath>,
    /// Static page-size parameter sent with every request.
    pub per_page: Option<PerPageParam>,
}

impl PaginationConfig {
    /// A convention that fetches exactly one page.
    pub fn single_page() -> Self {
        Self::default()
    }

    /// Creates a cursor convention.
    pub fn cursor(param: impl Into<String>, path: CursorPath) -> Self {
        Self {
            cursor_param: Some(param.into()),
            cursor_path: Some(path),
            per_page: None,
        }
    }

    /// Adds a static page-size parameter.
    pub fn with_per_page(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.per_page = Some(PerPageParam {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Reads the convention from the run configuration.
    pub fn from_config(config: &HarvestConfig) -> Result<Self, CoreError> {
        Ok(Self {
            cursor_param: config.cursor_param.clone().filter(|p| !p.is_empty()),
            cursor_path: config.cursor_path(),
            per_page: config.per_page_param()?,
        })
    }

    /// Returns true if both the cursor parameter and the cursor path are set.
    pub fn is_enabled(&self) -> bool {
        self.cursor_param.is_some() && self.cursor_path.is_some()
    }

    /// Builds the query parameters for one request.
    ///
    /// The cursor is omitted on the first request.
    pub fn params_for(&self, cursor: Option<&str>) -> QueryParams {
        let mut params = QueryParams::new();
        if let Some(per_page) = &self.per_page {
            params.push((per_page.key.clone(), per_page.value.clone()));
        }
        if let (Some(name), Some(cursor)) = (&self.cursor_param, cursor) {
            params.push((name.clone(), cursor.to_string()));
        }
        params
    }

    fn cursor_after(&self, page: &Page) -> Option<String> {
        if !self.is_enabled() {
            return None;
        }
        self.cursor_path.as_ref().and_then(|path| next_cursor(page, path))
    }
}

// ============================================================================
// Paginating Client
// ============================================================================

enum Step {
    First,
    Cursor(String),
    Exhausted,
}

struct Walk {
    step: Step,
    fetched: usize,
    started: Instant,
}

/// Walks an endpoint page by page until its cursor runs out.
pub struct PaginatingClient<S> {
    source: S,
    pagination: PaginationConfig,
    cancel: CancelSignal,
    deadline: Option<Duration>,
}

impl<S: PageSource> PaginatingClient<S> {
    /// Creates a client over `source` with the given cursor convention.
    pub fn new(source: S, pagination: PaginationConfig) -> Self {
        Self {
            source,
            pagination,
            cancel: CancelSignal::new(),
            deadline: None,
        }
    }

    /// Uses `cancel` to stop between pages.
    pub fn with_cancel(mut self, cancel: CancelSignal) -> Self {
        self.cancel = cancel;
        self
    }

    /// Stops with an error once `deadline` has elapsed, checked between pages.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Returns the underlying page source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns a lazy stream of pages.
    ///
    /// The first error ends the stream.
    pub fn pages(&self) -> impl Stream<Item = Result<Page, FetchError>> + '_ {
        let walk = Walk {
            step: Step::First,
            fetched: 0,
            started: Instant::now(),
        };

        stream::try_unfold(walk, move |mut walk| async move {
            let cursor = match std::mem::replace(&mut walk.step, Step::Exhausted) {
                Step::Exhausted => return Ok(None),
                Step::First => None,
                Step::Cursor(cursor) => {
                    self.check_interrupt(walk.fetched, walk.started)?;
                    Some(cursor)
                }
            };

            let params = self.pagination.params_for(cursor.as_deref());
            debug!(page = walk.fetched + 1, cursor = ?cursor, "Fetching page");
            let page = self.source.fetch_page(&params).await?;
            walk.fetched += 1;

            walk.step = match self.pagination.cursor_after(&page) {
                Some(next) => Step::Cursor(next),
                None => {
                    debug!(pages = walk.fetched, "Pagination exhausted");
                    Step::Exhausted
                }
            };

            Ok::<_, FetchError>(Some((page, walk)))
        })
    }

    /// Fetches every page.
    ///
    /// Any failure aborts the whole walk; no partial page list is returned.
    #[instrument(skip(self), fields(source = %self.source.describe(), paginated = self.pagination.is_enabled()))]
    pub async fn fetch_all(&self) -> Result<Vec<Page>, FetchError> {
        let pages: Vec<Page> = self.pages().try_collect().await?;
        info!(pages = pages.len(), "Fetched all pages");
        Ok(pages)
    }

    fn check_interrupt(&self, fetched: usize, started: Instant) -> Result<(), FetchError> {
        if self.cancel.is_cancelled() {
            return Err(FetchError::Cancelled { pages: fetched });
        }
        if self.deadline.is_some_and(|deadline| started.elapsed() >= deadline) {
            return Err(FetchError::DeadlineExceeded { pages: fetched });
        }
        Ok(())
    }
}
