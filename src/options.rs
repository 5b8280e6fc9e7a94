//! Configuration options for extraction and summarization.
//!
//! `Options` is a plain value: the core reads it but never performs I/O to
//! obtain it. See [`crate::config`] for loading it from a file and the
//! environment.

use std::time::Duration;

use crate::classifier::NonArticleDomainSet;

/// Hugging Face inference endpoint for the `facebook/bart-large-cnn` summarizer.
pub const DEFAULT_SUMMARIZATION_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-cnn";

/// Title used when a page has no (non-empty) `<title>`.
pub const UNTITLED: &str = "Untitled Article";

/// Configuration options for the digest pipeline.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use article_digest::Options;
///
/// let options = Options {
///     summarization_api_key: Some("hf_xxx".to_string()),
///     max_input_chars: 3500,
///     ..Options::default()
/// };
/// assert_eq!(options.excerpt_len, 150);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Bearer credential for the summarization backend.
    ///
    /// Missing credentials are a configuration error, not a fallback trigger.
    ///
    /// Default: `None`
    pub summarization_api_key: Option<String>,

    /// URL the abstractive summarizer is POSTed to.
    ///
    /// Default: [`DEFAULT_SUMMARIZATION_ENDPOINT`]
    pub summarization_endpoint: String,

    /// Hosts whose pages are not long-form prose (video, social, search).
    ///
    /// Default: [`NonArticleDomainSet::default`]
    pub non_article_domains: NonArticleDomainSet,

    /// Maximum characters of input dispatched to the summarizer.
    ///
    /// The document-order prefix is kept.
    ///
    /// Default: `4000`
    pub max_input_chars: usize,

    /// Inputs of at most this many characters are returned unsummarized.
    ///
    /// Default: `300`
    pub short_text_threshold: usize,

    /// Length of the content preview, in characters (ellipsis excluded).
    ///
    /// Default: `150`
    pub excerpt_len: usize,

    /// Length of the local summary used when the backend fails.
    ///
    /// Default: `500`
    pub fallback_summary_chars: usize,

    /// Character budget for the raw-text last-resort tier.
    ///
    /// Default: `3000`
    pub fallback_text_budget: usize,

    /// Paragraphs kept for the final content, in document order.
    ///
    /// Default: `5`
    pub max_paragraphs: usize,

    /// Paragraphs shorter than this are treated as junk by the strict filter.
    ///
    /// Default: `50`
    pub min_paragraph_chars: usize,

    /// Paragraphs shorter than this are dropped by the relaxed filter.
    ///
    /// Default: `40`
    pub relaxed_paragraph_chars: usize,

    /// Upper bound for fetching a page.
    ///
    /// Default: 20 seconds
    pub fetch_timeout: Duration,

    /// Upper bound for one summarization call.
    ///
    /// Default: 60 seconds
    pub summarize_timeout: Duration,

    /// `User-Agent` sent with page fetches.
    pub user_agent: String,

    /// Consult structured summary providers (Wikipedia REST) before generic extraction.
    ///
    /// Default: `true`
    pub structured_summaries: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            summarization_api_key: None,
            summarization_endpoint: DEFAULT_SUMMARIZATION_ENDPOINT.to_string(),
            non_article_domains: NonArticleDomainSet::default(),
            max_input_chars: 4000,
            short_text_threshold: 300,
            excerpt_len: 150,
            fallback_summary_chars: 500,
            fallback_text_budget: 3000,
            max_paragraphs: 5,
            min_paragraph_chars: 50,
            relaxed_paragraph_chars: 40,
            fetch_timeout: Duration::from_secs(20),
            summarize_timeout: Duration::from_secs(60),
            user_agent: concat!("article-digest/", env!("CARGO_PKG_VERSION")).to_string(),
            structured_summaries: true,
        }
    }
}

impl Options {
    /// The configured API key, if present and not blank.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.summarization_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_thresholds() {
        let opts = Options::default();

        assert!(opts.summarization_api_key.is_none());
        assert_eq!(opts.summarization_endpoint, DEFAULT_SUMMARIZATION_ENDPOINT);
        assert_eq!(opts.max_input_chars, 4000);
        assert_eq!(opts.short_text_threshold, 300);
        assert_eq!(opts.excerpt_len, 150);
        assert_eq!(opts.fallback_summary_chars, 500);
        assert_eq!(opts.fallback_text_budget, 3000);
        assert_eq!(opts.max_paragraphs, 5);
        assert_eq!(opts.min_paragraph_chars, 50);
        assert_eq!(opts.relaxed_paragraph_chars, 40);
        assert!(opts.structured_summaries);
        assert!(opts.user_agent.starts_with("article-digest/"));
        assert!(opts.non_article_domains.contains_entry("youtube.com"));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let opts = Options {
            summarization_api_key: Some("   ".to_string()),
            ..Options::default()
        };
        assert!(opts.api_key().is_none());

        let opts = Options {
            summarization_api_key: Some(" hf_token ".to_string()),
            ..Options::default()
        };
        assert_eq!(opts.api_key(), Some("hf_token"));
    }

    #[test]
    fn test_custom_thresholds() {
        let opts = Options {
            max_input_chars: 3500,
            short_text_threshold: 120,
            max_paragraphs: 3,
            ..Options::default()
        };

        assert_eq!(opts.max_input_chars, 3500);
        assert_eq!(opts.short_text_threshold, 120);
        assert_eq!(opts.max_paragraphs, 3);
        assert_eq!(opts.excerpt_len, 150);
    }
}
