//! Last-resort text recovery.
//!
//! Used when no paragraph survives either filter. With a tree available the
//! located node's flattened text is used, then the whole document's text;
//! without one the raw markup is stripped by pattern matching alone.
//! Every tier is capped at the configured character budget.

use crate::dom::{Document, Element};
use crate::parser::{normalize_markup, strip_markup, strip_tags};
use crate::result::ContentTier;
use crate::text::truncate_chars;

/// Text for when paragraph collection yields nothing.
///
/// `located` is the node chosen by the scorer; `html` the original markup.
/// Returns an empty string only when every tier is empty.
#[must_use]
pub fn recover_text(doc: &Document, located: &Element, html: &str, budget: usize) -> (String, ContentTier) {
    if doc.is_degraded() {
        let text = strip_markup(html);
        tracing::debug!(chars = text.len(), "regex-only text recovery");
        return (truncate_chars(&text, budget).to_string(), ContentTier::Stripped);
    }

    let mut text = located.normalized_text();
    if text.is_empty() {
        text = strip_tags(&normalize_markup(html));
    }
    (truncate_chars(&text, budget).to_string(), ContentTier::RawText)
}
