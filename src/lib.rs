//! # article-digest
//!
//! Main-article extraction and summarization for arbitrary web pages.
//!
//! Given a page's HTML, the extractor locates the node most likely to hold
//! the article, keeps its prose paragraphs, and drops site furniture such as
//! navigation fragments and disambiguation notices. Given a URL, the [`Digester`]
//! additionally fetches the page, short-circuits video/social/search hosts,
//! and produces a summary with an external model or a local fallback.
//!
//! ## Quick Start
//!
//! ```rust
//! use article_digest::extract;
//!
//! let html = r#"<html><head><title>My Article</title></head>
//! <body><nav><p>Home</p></nav><article>
//! <p>The main content of this article is long enough to pass the paragraph filter.</p>
//! </article></body></html>"#;
//!
//! let result = extract(html)?;
//! assert_eq!(result.title, "My Article");
//! assert!(result.content.starts_with("The main content"));
//! # Ok::<(), article_digest::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! - **Parsing**: tolerant HTML5 parsing into an owned tree; unrecoverable
//!   markup degrades to regex stripping instead of failing
//! - **Location**: candidate containers are scored by text length plus a
//!   bonus for content-like `id`/`class` names
//! - **Collection**: strict, then relaxed paragraph filters, then raw text
//! - **Summarization**: passthrough for short text, an abstractive backend
//!   otherwise, and a deterministic truncation when the backend fails

mod error;
mod extract;
mod options;
mod patterns;
mod result;

/// Owned element tree produced by the parser.
pub mod dom;

/// Tolerant HTML parsing and regex-level markup helpers.
pub mod parser;

/// Content-node scoring and location.
pub mod scoring;

/// Paragraph collection, filtering and fallback tiers.
pub mod extractor;

/// Non-article domain set and classification.
pub mod classifier;

/// URL parsing helpers.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Whitespace, truncation and word-count helpers.
pub mod text;

/// Page fetching.
pub mod fetch;

/// Summarization dispatch, backends and structured providers.
pub mod summarize;

/// The URL → digest pipeline.
pub mod digest;

/// Loading options from files and the environment.
pub mod config;

/// Logging setup.
pub mod observability;

// Public API - re-exports
pub use classifier::{is_non_article_domain, NonArticleDomainSet, DEFAULT_NON_ARTICLE_DOMAINS};
pub use digest::{Digester, DigesterBuilder};
pub use error::{Error, Result, SummarizeError};
pub use extract::{extract_document, page_title};
pub use options::{Options, DEFAULT_SUMMARIZATION_ENDPOINT, UNTITLED};
pub use result::{ContentTier, DigestResult, ExtractResult, SummaryResult, SummarySource};

/// Extracts the main article from an HTML document using default options.
///
/// Malformed markup never fails; an [`Error::NoContent`] is returned only
/// when every tier comes up empty.
///
/// ```rust
/// use article_digest::{extract, Error};
///
/// let result = extract("<html><body>   </body></html>");
/// assert!(matches!(result, Err(Error::NoContent { .. })));
/// ```
pub fn extract(html: &str) -> Result<ExtractResult> {
    extract_with_options(html, &Options::default())
}

/// Extracts the main article from an HTML document with custom options.
///
/// ```rust
/// use article_digest::{extract_with_options, Options};
///
/// let html = "<p>One paragraph of reasonable length about the weather in spring.</p>\
///             <p>Another paragraph describing the flowers that bloom in April.</p>";
/// let options = Options {
///     max_paragraphs: 1,
///     ..Options::default()
/// };
/// let result = extract_with_options(html, &options)?;
/// assert_eq!(result.paragraphs.len(), 1);
/// # Ok::<(), article_digest::Error>(())
/// ```
pub fn extract_with_options(html: &str, options: &Options) -> Result<ExtractResult> {
    extract::extract_content(html, options, None)
}

/// Extracts from raw bytes, detecting the encoding from a BOM or `<meta>`
/// charset and defaulting to UTF-8.
///
/// ```rust
/// use article_digest::extract_bytes;
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body>\
///              <p>Caf\xE9 culture has shaped the neighbourhood for over a century now.</p></body></html>";
/// let result = extract_bytes(html)?;
/// assert!(result.content.contains("Café"));
/// # Ok::<(), article_digest::Error>(())
/// ```
pub fn extract_bytes(html: &[u8]) -> Result<ExtractResult> {
    extract_bytes_with_options(html, &Options::default())
}

/// [`extract_bytes`] with custom options.
pub fn extract_bytes_with_options(html: &[u8], options: &Options) -> Result<ExtractResult> {
    let html = encoding::decode_html(html);
    extract_with_options(&html, options)
}
