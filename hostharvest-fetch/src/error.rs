//! Fetch error types.
//!
//! Every variant is fatal for a run: an incomplete page sequence could
//! silently under-report records, so nothing downstream salvages a partial
//! result.

use thiserror::Error;

/// Maximum number of response-body characters kept in a status error.
pub const MAX_ERROR_BODY_CHARS: usize = 512;

/// Error type for fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("API error {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated to [`MAX_ERROR_BODY_CHARS`].
        body: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// A success response whose body is not JSON.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The authentication header name or value cannot be sent.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The client could not be constructed.
    #[error("Client setup failed: {0}")]
    Setup(String),

    /// Pagination was cancelled between two fetches.
    #[error("Pagination cancelled after {pages} page(s)")]
    Cancelled {
        /// Pages fetched before the cancellation was observed.
        pages: usize,
    },

    /// The pagination deadline passed between two fetches.
    #[error("Pagination deadline exceeded after {pages} page(s)")]
    DeadlineExceeded {
        /// Pages fetched before the deadline was observed.
        pages: usize,
    },
}

impl FetchError {
    /// Creates a status error, truncating the body.
    pub fn status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            body: truncate_body(body),
        }
    }

    /// Returns the HTTP status code when the server answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if the run was interrupted rather than failed.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Cancelled { .. } | Self::DeadlineExceeded { .. })
    }
}

fn truncate_body(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((cut, _)) => format!("{}…", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_body_kept() {
        let err = FetchError::status(500, "  boom \n");
        assert_eq!(err.to_string(), "API error 500: boom");
        assert_eq!(err.status_code(), Some(500));
    }

    #[test]
    fn test_long_body_truncated_on_char_boundary() {
        let body = "é".repeat(MAX_ERROR_BODY_CHARS + 10);
        let FetchError::Status { body, .. } = FetchError::status(502, &body) else {
            panic!("expected a status error");
        };
        assert_eq!(body.chars().count(), MAX_ERROR_BODY_CHARS + 1);
        assert!(body.ends_with('…'));
    }

    #[test]
    fn test_interrupted() {
        assert!(FetchError::Cancelled { pages: 1 }.is_interrupted());
        assert!(FetchError::DeadlineExceeded { pages: 2 }.is_interrupted());
        assert!(!FetchError::Timeout(30).is_interrupted());
        assert_eq!(FetchError::Timeout(30).status_code(), None);
    }
}
