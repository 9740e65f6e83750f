//! Error types for the try-on proxy and client.

use std::time::Duration;

/// Errors that can occur while proxying or requesting a try-on.
#[derive(Debug, thiserror::Error)]
pub enum TryOnError {
    /// Deployment precondition missing (e.g. gateway API key).
    #[error("{0}")]
    Config(String),

    /// Gateway rate limit exceeded.
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Delay the gateway asked for, when it sent one.
        retry_after: Option<Duration>,
    },

    /// Gateway usage or credit limit reached.
    #[error("usage limit reached: {0}")]
    UsageLimit(String),

    /// Gateway returned another non-success status.
    #[error("API error: {status} - {message}")]
    Api {
        /// Upstream HTTP status.
        status: u16,
        /// Sanitized upstream body.
        message: String,
    },

    /// The proxy endpoint reported an error to the client.
    #[error("{0}")]
    Proxy(String),

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to decode base64 or a data URI.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// I/O error (e.g., reading an upload or saving a result).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for try-on operations.
pub type Result<T> = std::result::Result<T, TryOnError>;

/// Maximum characters of an upstream error body kept for logs.
const MAX_ERROR_BODY: usize = 300;

/// Collapses whitespace and truncates an upstream error body.
///
/// Gateway error bodies can be whole HTML pages; only a short single-line
/// excerpt goes into logs and error values.
pub(crate) fn sanitize_error_message(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= MAX_ERROR_BODY {
        return collapsed;
    }
    let mut truncated: String = collapsed.chars().take(MAX_ERROR_BODY).collect();
    truncated.push_str("...");
    truncated
}

/// Parses a `Retry-After` header given in whole seconds.
pub(crate) fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
