//! Summarization dispatch.
//!
//! [`SummaryDispatcher::summarize`] decides per call whether to pass short
//! text through, call the external backend, or fall back to a local
//! truncation. Backend failures never escape; a missing credential does.

pub mod huggingface;
pub mod providers;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result, SummarizeError};
use crate::options::Options;
use crate::result::{SummaryResult, SummarySource};
use crate::text::{normalize_whitespace, truncate_chars, truncate_with_ellipsis};

pub use huggingface::HuggingFaceSummarizer;
pub use providers::{ProviderRegistry, StructuredLead, StructuredSummaryProvider, WikipediaProvider};

/// An external abstractive summarization backend.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `text` (already normalized and truncated) using `api_key`.
    async fn summarize_external(&self, text: &str, api_key: &str) -> std::result::Result<String, SummarizeError>;

    /// Backend name for logs.
    fn name(&self) -> &str {
        "external"
    }
}

/// Deterministic local summary: the first `max_chars` characters of the
/// normalized text, with `"..."` when cut.
///
/// ```
/// use article_digest::summarize::local_summary;
///
/// assert_eq!(local_summary("  a   b  ", 500), "a b");
/// assert_eq!(local_summary("abcdef", 3), "abc...");
/// ```
#[must_use]
pub fn local_summary(text: &str, max_chars: usize) -> String {
    truncate_with_ellipsis(&normalize_whitespace(text), max_chars)
}

/// Routes text to passthrough, the backend, or the local fallback.
#[derive(Clone)]
pub struct SummaryDispatcher {
    backend: Arc<dyn Summarizer>,
    options: Arc<Options>,
}

impl std::fmt::Debug for SummaryDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryDispatcher")
            .field("backend", &self.backend.name())
            .finish_non_exhaustive()
    }
}

impl SummaryDispatcher {
    /// Dispatcher calling `backend` with the thresholds in `options`.
    #[must_use]
    pub fn new(backend: Arc<dyn Summarizer>, options: Arc<Options>) -> Self {
        Self { backend, options }
    }

    /// Summarize `text`.
    ///
    /// Short inputs come back unchanged without a network call. Otherwise
    /// the key is required ([`Error::Configuration`] when absent), the input
    /// is cut to `max_input_chars`, and any backend failure or timeout
    /// degrades to [`local_summary`].
    pub async fn summarize(&self, text: &str) -> Result<SummaryResult> {
        let text = normalize_whitespace(text);
        let chars = text.chars().count();

        if chars <= self.options.short_text_threshold {
            tracing::debug!(chars, "short input passed through");
            return Ok(SummaryResult {
                summary: text,
                source: SummarySource::Passthrough,
            });
        }

        let Some(api_key) = self.options.api_key() else {
            return Err(Error::Configuration(
                "summarization API key missing (set DIGEST_SUMMARIZATION_API_KEY or HUGGINGFACE_API_KEY)".to_string(),
            ));
        };

        let input = truncate_chars(&text, self.options.max_input_chars);
        let backend = self.backend.name();
        tracing::debug!(backend, input_chars = input.chars().count(), "calling summarizer");

        let outcome = tokio::time::timeout(
            self.options.summarize_timeout,
            self.backend.summarize_external(input, api_key),
        )
        .await;

        let failure = match outcome {
            Ok(Ok(summary)) if !summary.trim().is_empty() => {
                return Ok(SummaryResult {
                    summary: normalize_whitespace(&summary),
                    source: SummarySource::Model,
                });
            }
            Ok(Ok(_)) => SummarizeError::MalformedResponse("empty summary".to_string()),
            Ok(Err(err)) => err,
            Err(_) => SummarizeError::Transport(format!("timed out after {:?}", self.options.summarize_timeout)),
        };

        tracing::warn!(backend, error = %failure, "summarizer failed, using local summary");
        Ok(SummaryResult {
            summary: local_summary(&text, self.options.fallback_summary_chars),
            source: SummarySource::Fallback,
        })
    }
}
