//! Paragraph extraction from the located content node.
//!
//! # Module Structure
//!
//! - `paragraphs`: `P` collection plus the strict and relaxed junk filters
//! - `fallback`: raw-text tiers for pages without usable paragraphs
//!
//! [`select_content`] runs the tiers in order and reports which one produced
//! the text.

pub mod fallback;
pub mod paragraphs;

use crate::dom::{Document, Element};
use crate::options::Options;
use crate::result::ContentTier;

/// Text chosen for one page, before title/excerpt assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedContent {
    /// Kept paragraphs in document order; empty for the raw-text tiers.
    pub paragraphs: Vec<String>,
    /// Paragraphs joined by a blank line, or the recovered raw text.
    pub text: String,
    /// The tier that produced `text`.
    pub tier: ContentTier,
}

/// Run the extraction tiers against the located node.
///
/// 1. paragraphs passing the length and phrase filter;
/// 2. paragraphs passing the relaxed length filter;
/// 3. flattened text, capped at `fallback_text_budget`.
///
/// At most `max_paragraphs` paragraphs are kept, in document order.
#[must_use]
pub fn select_content(doc: &Document, located: &Element, html: &str, options: &Options) -> SelectedContent {
    let collected = paragraphs::collect(located);

    let mut tier = ContentTier::Paragraphs;
    let mut kept = paragraphs::filter_strict(&collected, options.min_paragraph_chars);
    if kept.is_empty() {
        tier = ContentTier::RelaxedParagraphs;
        kept = paragraphs::filter_relaxed(&collected, options.relaxed_paragraph_chars);
    }

    if kept.is_empty() {
        let (text, tier) = fallback::recover_text(doc, located, html, options.fallback_text_budget);
        return SelectedContent {
            paragraphs: Vec::new(),
            text,
            tier,
        };
    }

    kept.truncate(options.max_paragraphs);
    tracing::debug!(collected = collected.len(), kept = kept.len(), ?tier, "paragraphs selected");
    SelectedContent {
        text: kept.join("\n\n"),
        paragraphs: kept,
        tier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    const LONG: &str = "This paragraph is comfortably longer than the fifty character minimum.";

    #[test]
    fn keeps_first_five_in_document_order() {
        let html: String = (1..=7).map(|i| format!("<p>{i}. {LONG}</p>")).collect();
        let doc = parse(&html);
        let selected = select_content(&doc, doc.root(), &html, &Options::default());
        assert_eq!(selected.tier, ContentTier::Paragraphs);
        assert_eq!(selected.paragraphs.len(), 5);
        assert!(selected.paragraphs[0].starts_with("1."));
        assert!(selected.paragraphs[4].starts_with("5."));
        assert!(selected.text.contains("\n\n"));
    }

    #[test]
    fn relaxed_tier_recovers_short_articles() {
        let html = "<p>A short but legitimate note of some 45 chars.</p>";
        let doc = parse(html);
        let selected = select_content(&doc, doc.root(), html, &Options::default());
        assert_eq!(selected.tier, ContentTier::RelaxedParagraphs);
        assert_eq!(selected.paragraphs.len(), 1);
    }

    #[test]
    fn raw_text_tier_when_no_paragraphs() {
        let html = "<div>only a div</div>";
        let doc = parse(html);
        let selected = select_content(&doc, doc.root(), html, &Options::default());
        assert_eq!(selected.tier, ContentTier::RawText);
        assert_eq!(selected.text, "only a div");
        assert!(selected.paragraphs.is_empty());
    }
}
