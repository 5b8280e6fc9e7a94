//! Error types for article-digest.
//!
//! Extraction itself never fails on bad markup: degraded parses fall back to
//! regex stripping. What reaches the caller is one of the variants below.

/// Error type for extraction and digest operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Every extraction tier (structured, relaxed, raw text) came up empty.
    #[error("no usable article content found for {url}")]
    NoContent {
        /// URL (or `"<inline html>"`) the content was requested for.
        url: String,
    },

    /// The summarization backend is not configured (missing API key, bad endpoint).
    ///
    /// Kept apart from transport failures so "not configured" and
    /// "service is down" can be told apart.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The page could not be fetched. Terminal for the request.
    #[error("failed to fetch {url}: {reason}")]
    Fetch {
        /// The offending URL.
        url: String,
        /// Transport error or HTTP status description.
        reason: String,
    },

    /// The input URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for digest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure talking to an external summarization backend.
///
/// Never crosses the [`crate::summarize::SummaryDispatcher`] boundary: the
/// dispatcher logs it and falls back to a local summary.
#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    /// Network failure or timeout.
    #[error("transport error: {0}")]
    Transport(String),

    /// Backend answered with a non-success status.
    #[error("backend returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },

    /// Backend answered 2xx but without a usable summary field.
    #[error("unexpected response shape: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for SummarizeError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
