//! Content scorer / locator.
//!
//! One post-order walk over the tree. Every container element (`DIV`, `MAIN`,
//! `ARTICLE`, `SECTION`, `BODY`) is scored by the length of its flattened,
//! whitespace-normalized text, plus a flat bonus when its `id` or `class`
//! carries a content marker. Text lengths are folded up from the children,
//! so each node and each character is visited once. The highest score wins;
//! on ties the first node in document order is kept.

use crate::dom::{is_block_tag, Document, Element, Node};

/// Tags eligible as the article container.
pub const CANDIDATE_TAGS: &[&str] = &["DIV", "MAIN", "ARTICLE", "SECTION", "BODY"];

/// Substrings of `id`/`class` that mark a content wrapper. `mw-parser-output`
/// is MediaWiki's article wrapper.
pub const CONTENT_MARKERS: &[&str] = &[
    "content",
    "article",
    "main",
    "post",
    "page",
    "entry",
    "mw-parser-output",
];

/// Bonus added for a content marker.
pub const MARKER_BONUS: usize = 2000;

/// A scored candidate. Only lives for the duration of one walk.
#[derive(Debug, Clone, Copy)]
pub struct CandidateScore<'a> {
    /// The scored element.
    pub node: &'a Element,
    /// Text length plus any marker bonus.
    pub score: usize,
}

/// Score one element whose normalized text is `text_chars` characters long;
/// `None` when the tag is not a candidate.
#[must_use]
pub fn score_element(el: &Element, text_chars: usize) -> Option<usize> {
    if !CANDIDATE_TAGS.contains(&el.name()) {
        return None;
    }
    let mut score = text_chars;
    if has_content_marker(el) {
        score += MARKER_BONUS;
    }
    Some(score)
}

/// Whether `id` or `class` contains a content marker (case-insensitive).
#[must_use]
pub fn has_content_marker(el: &Element) -> bool {
    [el.id(), el.class_name()]
        .into_iter()
        .flatten()
        .map(str::to_ascii_lowercase)
        .any(|attr| CONTENT_MARKERS.iter().any(|marker| attr.contains(marker)))
}

/// The element most likely to hold the article body.
///
/// Falls back to `BODY` (or the document element when there is no body)
/// when no candidate scores above zero.
#[must_use]
pub fn locate(doc: &Document) -> &Element {
    let fallback = doc.body().unwrap_or_else(|| doc.root());

    match best_candidate(doc.root()) {
        Some(best) => {
            tracing::debug!(node = best.node.name(), score = best.score, "best content node");
            best.node
        }
        None => {
            tracing::debug!(node = fallback.name(), "no scoring candidate, using fallback node");
            fallback
        }
    }
}

/// Highest-scoring candidate under (and including) `root`, first wins ties.
#[must_use]
pub fn best_candidate(root: &Element) -> Option<CandidateScore<'_>> {
    let mut walk = Walk::default();
    walk.visit(root);
    walk.best.map(|(candidate, _)| candidate)
}

#[derive(Default)]
struct Walk<'a> {
    next_index: usize,
    /// Best candidate so far and its pre-order index.
    best: Option<(CandidateScore<'a>, usize)>,
}

impl<'a> Walk<'a> {
    /// Scores `el` after its children and returns its text extent.
    fn visit(&mut self, el: &'a Element) -> TextExtent {
        let index = self.next_index;
        self.next_index += 1;

        let block = is_block_tag(el.name());
        let mut extent = if block { TextExtent::SPACE } else { TextExtent::EMPTY };
        for child in el.children() {
            let child_extent = match child {
                Node::Element(child) => self.visit(child),
                Node::Text(text) => TextExtent::of(text),
            };
            extent = extent.then(child_extent);
        }
        if block {
            extent = extent.then(TextExtent::SPACE);
        }

        if let Some(score) = score_element(el, extent.chars) {
            self.consider(CandidateScore { node: el, score }, index);
        }
        extent
    }

    fn consider(&mut self, candidate: CandidateScore<'a>, index: usize) {
        if candidate.score == 0 {
            return;
        }
        let better = match self.best {
            None => true,
            Some((best, best_index)) => {
                candidate.score > best.score || (candidate.score == best.score && index < best_index)
            }
        };
        if better {
            self.best = Some((candidate, index));
        }
    }
}

/// Length of a text run once whitespace is collapsed and trimmed, plus
/// whether whitespace touched either end (and would separate it from a
/// neighbouring run).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TextExtent {
    chars: usize,
    has_text: bool,
    leading_space: bool,
    trailing_space: bool,
}

impl TextExtent {
    const EMPTY: Self = Self {
        chars: 0,
        has_text: false,
        leading_space: false,
        trailing_space: false,
    };

    const SPACE: Self = Self {
        chars: 0,
        has_text: false,
        leading_space: true,
        trailing_space: true,
    };

    fn of(text: &str) -> Self {
        let mut extent = Self::EMPTY;
        let mut in_space = false;
        for c in text.chars() {
            if c.is_whitespace() {
                if extent.has_text {
                    in_space = true;
                } else {
                    extent.leading_space = true;
                }
            } else {
                if in_space {
                    extent.chars += 1;
                    in_space = false;
                }
                extent.chars += 1;
                extent.has_text = true;
            }
        }
        extent.trailing_space = in_space || (!extent.has_text && extent.leading_space);
        extent
    }

    /// `self` followed by `next`.
    fn then(self, next: Self) -> Self {
        match (self.has_text, next.has_text) {
            (false, _) => Self {
                leading_space: self.leading_space || next.leading_space,
                trailing_space: if next.has_text {
                    next.trailing_space
                } else {
                    self.trailing_space || next.trailing_space
                },
                ..next
            },
            (true, false) => Self {
                trailing_space: self.trailing_space || next.leading_space,
                ..self
            },
            (true, true) => Self {
                chars: self.chars + next.chars + usize::from(self.trailing_space || next.leading_space),
                has_text: true,
                leading_space: self.leading_space,
                trailing_space: next.trailing_space,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn non_candidate_tags_are_not_scored() {
        let doc = parse("<html><body><table><tr><td>lots of text here</td></tr></table></body></html>");
        assert_eq!(doc.query_selector("td").and_then(|td| score_element(td, 17)), None);
        assert!(doc.body().and_then(|body| score_element(body, 17)).is_some());
    }

    #[test]
    fn marker_bonus_beats_longer_text() {
        let filler = "word ".repeat(200);
        let html = format!(
            r#"<body><div class="sidebar">{filler}</div><div id="post-body">short article text</div></body>"#
        );
        let doc = parse(&html);
        let best = locate(&doc);
        assert_eq!(best.id(), Some("post-body"));
    }

    #[test]
    fn marker_match_is_case_insensitive_substring() {
        let doc = parse(r#"<body><section class="Main-Column">x</section></body>"#);
        assert!(doc.query_selector("section").is_some_and(has_content_marker));
    }

    #[test]
    fn ties_keep_first_in_document_order() {
        // BODY and ARTICLE carry the same text; BODY comes first in pre-order
        let doc = parse("<html><body><article><p>Same text everywhere.</p></article></body></html>");
        assert_eq!(locate(&doc).name(), "BODY");
    }

    #[test]
    fn nested_wrapper_with_marker_wins_over_plain_parent() {
        let doc = parse(
            r#"<body><div><div class="entry-content"><p>Body text of the entry.</p></div></div></body>"#,
        );
        assert_eq!(locate(&doc).class_name(), Some("entry-content"));
    }

    #[test]
    fn empty_document_falls_back_to_body() {
        let doc = parse("<html><body></body></html>");
        assert_eq!(locate(&doc).name(), "BODY");
    }

    #[test]
    fn folded_length_matches_normalized_text() {
        let samples = [
            "<body><div> a  b </div><p>c</p>d<span> e</span><span>f </span></body>",
            "<body><div><p>one</p><p>two</p></div>  <section>\n\t</section>three</body>",
            "<body><b>x</b><i>y</i> <div></div><br>z\u{a0}\u{a0}w</body>",
            "<body>   </body>",
        ];
        for html in samples {
            let doc = parse(html);
            for el in doc.root().descendants() {
                let folded = Walk::default().visit(el).chars;
                assert_eq!(folded, el.normalized_text().chars().count(), "{html} at {}", el.name());
            }
        }
    }

    #[test]
    fn equal_siblings_keep_the_first() {
        let doc = parse(
            r#"<body><div id="a-post">same length text</div><div id="b-post">same length text</div></body>"#,
        );
        assert_eq!(locate(&doc).id(), Some("a-post"));
    }
}
