//! Tolerant markup parser.
//!
//! Raw markup goes through a normalization pass (scripts, styles and
//! comments removed, bare attributes quoted, stray control characters
//! dropped) and is then parsed with `dom_query`, whose html5ever backend
//! repairs unterminated and misnested tags. The result is converted into the
//! owned [`Document`] tree.
//!
//! Parsing never fails from the caller's point of view: if the parser library
//! gives up, [`parse`] logs a warning and returns [`Document::empty`], and
//! extraction continues with the regex-only helpers at the bottom of this
//! module.

use std::panic::{self, AssertUnwindSafe};

use dom_query::{Document as QueryDocument, NodeRef, Selection};
use regex::Captures;

use crate::dom::{is_block_tag, Document, Element, Node};
use crate::encoding;
use crate::patterns::{
    ANY_TAG, BARE_ATTRIBUTE, CONTROL_CHARS, HTML_COMMENT, SCRIPT_BLOCK, START_TAG, STYLE_BLOCK,
    TITLE_TAG,
};
use crate::text::normalize_whitespace;

/// Elements below this depth are flattened into their ancestor at the cut.
const MAX_DEPTH: usize = 256;

/// Elements whose content is never prose. Unterminated `<script>` blocks
/// survive normalization and end up here.
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Parse raw markup into a [`Document`].
///
/// ```
/// use article_digest::parser::parse;
///
/// let doc = parse("<div><p>text");
/// assert!(!doc.is_degraded());
/// assert_eq!(doc.get_elements_by_tag_name("p").len(), 1);
/// ```
#[must_use]
pub fn parse(html: &str) -> Document {
    let normalized = normalize_markup(html);

    match panic::catch_unwind(AssertUnwindSafe(|| build_tree(&normalized))) {
        Ok(Some(root)) => Document::new(root, false),
        Ok(None) => {
            tracing::warn!(len = html.len(), "parser produced no document element, using empty shim");
            Document::empty()
        }
        Err(_) => {
            tracing::warn!(len = html.len(), "parser failed on malformed markup, using empty shim");
            Document::empty()
        }
    }
}

/// Parse raw page bytes, sniffing the declared charset first.
#[must_use]
pub fn parse_bytes(html: &[u8]) -> Document {
    parse(&encoding::decode_html(html))
}

/// Pre-parse cleanup.
///
/// Removes `<script>`/`<style>` blocks and comments entirely and rewrites
/// bare attributes such as `itemscope` to `itemscope="true"`.
#[must_use]
pub fn normalize_markup(html: &str) -> String {
    let html = CONTROL_CHARS.replace_all(html, "");
    let html = SCRIPT_BLOCK.replace_all(&html, "");
    let html = STYLE_BLOCK.replace_all(&html, "");
    let html = HTML_COMMENT.replace_all(&html, "");
    START_TAG
        .replace_all(&html, |caps: &Captures| quote_bare_attributes(&caps[0]))
        .into_owned()
}

fn quote_bare_attributes(tag: &str) -> String {
    BARE_ATTRIBUTE
        .replace_all(tag, |caps: &Captures| {
            let Some(name) = caps.get(1).map(|m| m.as_str()) else {
                return caps[0].to_string();
            };
            if caps.get(2).is_some() {
                return caps[0].to_string();
            }
            let value = if name.eq_ignore_ascii_case("news-link-class") {
                ""
            } else {
                "true"
            };
            format!(" {name}=\"{value}\"")
        })
        .into_owned()
}

fn build_tree(html: &str) -> Option<Element> {
    let doc = QueryDocument::from(html);
    let html_sel = doc.select("html");
    let root = html_sel.nodes().first()?;

    let mut truncated = false;
    let tree = convert_element(root, 0, &mut truncated);
    if truncated {
        tracing::warn!(max_depth = MAX_DEPTH, "deeply nested markup flattened");
    }
    Some(tree)
}

fn convert_element(node: &NodeRef, depth: usize, truncated: &mut bool) -> Element {
    let name = node.node_name().map(|n| n.to_string()).unwrap_or_default();
    let mut element = Element::new(&name);

    let sel = Selection::from(*node);
    element.set_id(sel.attr("id").map(|v| v.to_string()));
    element.set_class(sel.attr("class").map(|v| v.to_string()));

    if depth >= MAX_DEPTH {
        *truncated = true;
        flatten_below(node, &mut element);
        return element;
    }

    for child in node.children() {
        if child.is_element() {
            if !is_skipped(&child) {
                element.push(Node::Element(convert_element(&child, depth + 1, truncated)));
            }
        } else if child.is_text() {
            let text = child.text();
            if !text.is_empty() {
                element.push(Node::Text(text.to_string()));
            }
        }
    }

    element
}

fn is_skipped(node: &NodeRef) -> bool {
    node.node_name()
        .is_some_and(|tag| SKIPPED_TAGS.iter().any(|s| tag.eq_ignore_ascii_case(s)))
}

/// Append the text below `node` to `into` without nesting any further.
///
/// Every outermost `P` becomes a direct `P` child holding its flattened
/// text; text outside paragraphs becomes plain text children. Block
/// boundaries are kept as spaces. The walk uses an explicit stack.
fn flatten_below(node: &NodeRef, into: &mut Element) {
    enum Step<'a> {
        Enter(NodeRef<'a>),
        Leave { block: bool, closes_paragraph: bool },
    }

    let mut loose = String::new();
    let mut paragraph: Option<String> = None;
    let mut stack: Vec<Step<'_>> = node.children().into_iter().rev().map(Step::Enter).collect();

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(child) if child.is_element() => {
                if is_skipped(&child) {
                    continue;
                }
                let tag = child.node_name().map(|n| n.to_ascii_uppercase()).unwrap_or_default();
                let block = is_block_tag(&tag);
                let closes_paragraph = tag == "P" && paragraph.is_none();
                if closes_paragraph {
                    paragraph = Some(String::new());
                } else if block {
                    paragraph.as_mut().unwrap_or(&mut loose).push(' ');
                }
                stack.push(Step::Leave { block, closes_paragraph });
                stack.extend(child.children().into_iter().rev().map(Step::Enter));
            }
            Step::Enter(child) => {
                if child.is_text() {
                    paragraph.as_mut().unwrap_or(&mut loose).push_str(&child.text());
                }
            }
            Step::Leave { block, closes_paragraph } => {
                if closes_paragraph {
                    if let Some(text) = paragraph.take() {
                        push_loose_text(into, &mut loose);
                        into.push(Node::Element(Element::new("P").with_text(&text)));
                    }
                } else if block {
                    paragraph.as_mut().unwrap_or(&mut loose).push(' ');
                }
            }
        }
    }
    push_loose_text(into, &mut loose);
}

fn push_loose_text(into: &mut Element, loose: &mut String) {
    if !loose.trim().is_empty() {
        into.push(Node::Text(std::mem::take(loose)));
    }
    loose.clear();
}

// =============================================================================
// Regex-only fallbacks
// =============================================================================

/// Drop every tag and collapse whitespace; basic entities are decoded.
#[must_use]
pub fn strip_tags(html: &str) -> String {
    normalize_whitespace(&decode_basic_entities(&ANY_TAG.replace_all(html, " ")))
}

/// Like [`strip_tags`], but removes `<script>`/`<style>` blocks and comments
/// with their content first. Used when no tree could be built at all.
#[must_use]
pub fn strip_markup(html: &str) -> String {
    let html = SCRIPT_BLOCK.replace_all(html, " ");
    let html = STYLE_BLOCK.replace_all(&html, " ");
    let html = HTML_COMMENT.replace_all(&html, " ");
    strip_tags(&html)
}

/// `<title>` text found by pattern matching alone, trimmed the same way
/// [`Document::title`] trims the parsed title.
#[must_use]
pub fn title_from_markup(html: &str) -> Option<String> {
    TITLE_TAG
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| decode_basic_entities(m.as_str()).trim().to_string())
        .filter(|title| !title.is_empty())
}

fn decode_basic_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#34;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_strips_scripts_styles_and_comments() {
        let html = "<p>a</p><script>var p = '<p>x</p>';</script><style>p{}</style><!-- <p>c</p> --><p>b</p>";
        assert_eq!(normalize_markup(html), "<p>a</p><p>b</p>");
    }

    #[test]
    fn normalization_quotes_bare_attributes() {
        let html = r#"<iframe src="v" allowfullscreen></iframe><div itemscope data-nosnippet>x</div>"#;
        let out = normalize_markup(html);
        assert!(out.contains(r#"allowfullscreen="true""#));
        assert!(out.contains(r#"itemscope="true""#));
        assert!(out.contains(r#"data-nosnippet="true""#));
    }

    #[test]
    fn normalization_leaves_valued_attributes_and_prose_alone() {
        let html = r#"<div itemscope="x">we allowfullscreen here</div>"#;
        assert_eq!(normalize_markup(html), html);
    }

    #[test]
    fn normalization_leaves_names_inside_quoted_values_alone() {
        let html = r#"<div class="schema itemscope content" title='allowfullscreen'>x</div>"#;
        assert_eq!(normalize_markup(html), html);

        let doc = parse(html);
        let div = doc.query_selector("div");
        assert_eq!(div.and_then(Element::class_name), Some("schema itemscope content"));
    }

    #[test]
    fn quoted_value_does_not_hide_a_later_bare_attribute() {
        let out = normalize_markup(r#"<div class="itemscope" itemscope>x</div>"#);
        assert_eq!(out, r#"<div class="itemscope" itemscope="true">x</div>"#);
    }

    #[test]
    fn tags_are_uppercased_and_attributes_kept() {
        let doc = parse(r#"<html><body><div id="main" class="post body">x</div></body></html>"#);
        let div = doc.query_selector("div");
        assert_eq!(div.map(Element::name), Some("DIV"));
        assert_eq!(div.and_then(Element::id), Some("main"));
        assert_eq!(div.and_then(Element::class_name), Some("post body"));
    }

    #[test]
    fn unterminated_markup_is_repaired() {
        let doc = parse("<div><p>text");
        assert!(!doc.is_degraded());
        let p = doc.query_selector("p").map(Element::text_content);
        assert_eq!(p.as_deref(), Some("text"));
    }

    #[test]
    fn plain_text_lands_in_body() {
        let doc = parse("just some words");
        assert_eq!(doc.body().map(Element::normalized_text).as_deref(), Some("just some words"));
    }

    #[test]
    fn unterminated_script_content_is_not_text() {
        let doc = parse("<body><p>keep</p><script>var hidden = 1;");
        assert!(!doc.text_content().contains("hidden"));
        assert!(doc.text_content().contains("keep"));
    }

    #[test]
    fn entities_are_decoded_by_the_parser() {
        let doc = parse("<p>Fish &amp; chips</p>");
        assert_eq!(doc.query_selector("p").map(Element::text_content).as_deref(), Some("Fish & chips"));
    }

    #[test]
    fn deep_nesting_does_not_overflow() {
        let html = "<div>".repeat(5000) + "deep" + &"</div>".repeat(5000);
        let doc = parse(&html);
        assert!(!doc.is_degraded());
        assert_eq!(doc.root().normalized_text(), "deep");
    }

    #[test]
    fn paragraphs_below_the_depth_cap_stay_paragraphs() {
        let html = format!(
            "{}<p>first <b>deep</b> para</p><span>loose</span><div><p>second</p></div>{}",
            "<div>".repeat(400),
            "</div>".repeat(400)
        );
        let doc = parse(&html);
        let paragraphs: Vec<String> = doc
            .get_elements_by_tag_name("p")
            .into_iter()
            .map(Element::normalized_text)
            .collect();
        assert_eq!(paragraphs, vec!["first deep para", "second"]);
        assert!(doc.root().normalized_text().contains("loose"));
    }

    #[test]
    fn pattern_title_matches_parsed_title() {
        let html = "<html><head><title>\n  Two   spaced\n  title </title></head><body></body></html>";
        assert_eq!(title_from_markup(html), parse(html).title());
    }

    #[test]
    fn strip_markup_drops_script_content() {
        let html = "<p>a &amp; b</p><script>alert(1)</script><style>x{}</style>";
        assert_eq!(strip_markup(html), "a & b");
    }

    #[test]
    fn title_from_markup_handles_missing_title() {
        assert_eq!(title_from_markup("<title> Hi &amp; there </title>").as_deref(), Some("Hi & there"));
        assert!(title_from_markup("<title>  </title>").is_none());
        assert!(title_from_markup("<p>no title</p>").is_none());
    }
}
