//! Result types for extraction and digest output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which extraction tier produced the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentTier {
    /// Paragraphs that passed the length and boilerplate filter.
    Paragraphs,
    /// Paragraphs that passed the relaxed length-only filter.
    RelaxedParagraphs,
    /// Flattened text of the located node (or the whole document), capped.
    RawText,
    /// Regex-only stripping; no tree could be built.
    Stripped,
}

/// Result of extracting the main article from one page.
///
/// `excerpt` is always a prefix of `content` (plus `"..."` iff truncated)
/// and `content` never contains runs of whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractResult {
    /// Page title, or [`crate::options::UNTITLED`].
    pub title: String,

    /// Main article text, whitespace-normalized.
    pub content: String,

    /// Short preview of `content`.
    pub excerpt: String,

    /// Selected paragraphs in document order (empty for the raw-text tiers).
    pub paragraphs: Vec<String>,

    /// Words in `content`.
    pub word_count: usize,

    /// Estimated minutes to read `content`.
    pub reading_time_minutes: usize,

    /// Tier the content came from.
    pub tier: ContentTier,

    /// True when the markup could not be parsed structurally.
    pub degraded: bool,
}

/// Where a digest's summary came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SummarySource {
    /// Non-article host; the summary is the page title (or hostname).
    NonArticle,
    /// Lead text from a structured summary provider, by provider name.
    Structured(String),
    /// Input was short enough to be returned as is.
    Passthrough,
    /// Generated by the external summarization backend.
    Model,
    /// Backend failed; deterministic truncation of the input.
    Fallback,
}

/// Output of the summarization dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    /// Non-empty whenever the input was non-empty.
    pub summary: String,
    /// How it was produced.
    pub source: SummarySource,
}

/// Full pipeline output for one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestResult {
    /// The requested URL.
    pub url: String,
    /// Display title.
    pub title: String,
    /// Article text (the title itself for non-article hosts).
    pub content: String,
    /// Preview of `content`.
    pub excerpt: String,
    /// Summary text.
    pub summary: String,
    /// Provenance of `summary`.
    pub source: SummarySource,
    /// Words in `content`.
    pub word_count: usize,
    /// Estimated minutes to read `content`.
    pub reading_time_minutes: usize,
    /// When the digest was produced.
    pub created_at: DateTime<Utc>,
}
