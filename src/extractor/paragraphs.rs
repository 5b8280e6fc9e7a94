//! Paragraph collection and boilerplate filtering.
//!
//! Paragraphs are the flattened text of every `P` under the located node.
//! Collection does not descend into a paragraph once found, so nested
//! markup inside a `P` (or a misnested `P` inside a `P`) is read once.

use crate::dom::{Element, Node};

/// Case-insensitive phrases that mark site furniture rather than article text:
/// hatnotes, disambiguation notices, coordinate stamps, "see also" blocks and
/// editorial/navigation chrome.
pub const JUNK_PHRASES: &[&str] = &[
    "this page includes",
    "may refer to",
    "is a disambiguation page",
    "coordinates:",
    "see also",
    "navigation menu",
    "help us improve wikipedia",
    "from wikipedia",
    "edit section",
];

/// Text of every `P` below `node`, in document order.
///
/// Pure function of the subtree; empty paragraphs are skipped.
#[must_use]
pub fn collect(node: &Element) -> Vec<String> {
    let mut out = Vec::new();
    walk(node, &mut out);
    out
}

fn walk(el: &Element, out: &mut Vec<String>) {
    if el.is("p") {
        let text = el.normalized_text();
        if !text.is_empty() {
            out.push(text);
        }
        return;
    }
    for child in el.children() {
        if let Node::Element(child) = child {
            walk(child, out);
        }
    }
}

/// True when `paragraph` is shorter than `min_chars` or contains a junk phrase.
#[must_use]
pub fn is_junk(paragraph: &str, min_chars: usize) -> bool {
    if paragraph.chars().count() < min_chars {
        return true;
    }
    let lower = paragraph.to_lowercase();
    JUNK_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

/// Paragraphs that pass both the length and the phrase filter.
#[must_use]
pub fn filter_strict(paragraphs: &[String], min_chars: usize) -> Vec<String> {
    paragraphs
        .iter()
        .filter(|p| !is_junk(p, min_chars))
        .cloned()
        .collect()
}

/// Paragraphs of at least `min_chars`, with no phrase filtering.
#[must_use]
pub fn filter_relaxed(paragraphs: &[String], min_chars: usize) -> Vec<String> {
    paragraphs
        .iter()
        .filter(|p| p.chars().count() >= min_chars)
        .cloned()
        .collect()
}
