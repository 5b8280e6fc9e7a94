//! Main-article extraction.
//!
//! parse → locate → collect → assemble. Nothing here touches the network;
//! the same markup always yields the same result.

use crate::dom::Document;
use crate::error::{Error, Result};
use crate::extractor::select_content;
use crate::options::{Options, UNTITLED};
use crate::parser::{self, title_from_markup};
use crate::result::ExtractResult;
use crate::scoring;
use crate::text::{normalize_whitespace, reading_time_minutes, truncate_with_ellipsis, word_count};

/// Label used in errors when no URL accompanies the markup.
pub(crate) const INLINE_SOURCE: &str = "<inline html>";

/// Parse `html` and extract its main article.
pub(crate) fn extract_content(html: &str, options: &Options, url: Option<&str>) -> Result<ExtractResult> {
    let doc = parser::parse(html);
    extract_document(&doc, html, options).ok_or_else(|| Error::NoContent {
        url: url.unwrap_or(INLINE_SOURCE).to_string(),
    })
}

/// Extract from an already-parsed document. `html` is the markup `doc` was
/// parsed from, used by the regex tiers. `None` when every tier is empty.
#[must_use]
pub fn extract_document(doc: &Document, html: &str, options: &Options) -> Option<ExtractResult> {
    let title = page_title(doc, html);

    let located = scoring::locate(doc);
    let selected = select_content(doc, located, html, options);

    let content = normalize_whitespace(&selected.text);
    if content.is_empty() {
        tracing::debug!(degraded = doc.is_degraded(), "no usable content");
        return None;
    }

    let words = word_count(&content);
    Some(ExtractResult {
        excerpt: truncate_with_ellipsis(&content, options.excerpt_len),
        title,
        content,
        paragraphs: selected.paragraphs,
        word_count: words,
        reading_time_minutes: reading_time_minutes(words),
        tier: selected.tier,
        degraded: doc.is_degraded(),
    })
}

/// The trimmed `<title>`, or [`UNTITLED`].
#[must_use]
pub fn page_title(doc: &Document, html: &str) -> String {
    find_title(doc, html).unwrap_or_else(|| UNTITLED.to_string())
}

/// The trimmed `<title>` text, read from the tree, or from the markup by
/// pattern when the parse degraded. `None` when absent or blank.
pub(crate) fn find_title(doc: &Document, html: &str) -> Option<String> {
    if doc.is_degraded() {
        title_from_markup(html)
    } else {
        doc.title()
    }
}

/// [`find_title`] for markup that has not been parsed yet.
pub(crate) fn title_of_markup(html: &str) -> Option<String> {
    find_title(&parser::parse(html), html)
}
