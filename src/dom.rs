//! Minimal navigable node tree.
//!
//! The parser converts the html5ever tree produced by `dom_query` into this
//! closed, owned representation: a node is either an element (uppercase tag
//! name, `id`/`class`, ordered children) or a run of text. Traversal code
//! pattern-matches on [`Node`] instead of probing loosely-typed shapes.
//!
//! The tree owns all of its data and borrows nothing from the parser, so it can
//! be built, walked and dropped within a single request.

use crate::text::normalize_whitespace;

/// Node name reported for text nodes.
pub const TEXT_NODE_NAME: &str = "#text";

/// Elements whose boundaries separate words when text is flattened.
const BLOCK_TAGS: &[&str] = &[
    "ADDRESS", "ARTICLE", "ASIDE", "BLOCKQUOTE", "BODY", "BR", "DD", "DIV", "DL", "DT",
    "FIELDSET", "FIGCAPTION", "FIGURE", "FOOTER", "FORM", "H1", "H2", "H3", "H4", "H5", "H6",
    "HEADER", "HR", "LI", "MAIN", "NAV", "OL", "P", "PRE", "SECTION", "TABLE", "TD", "TH",
    "TR", "UL",
];

/// A node in the parsed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with its children.
    Element(Element),
    /// A text run, entities already decoded.
    Text(String),
}

impl Node {
    /// Tag name in uppercase, or [`TEXT_NODE_NAME`] for text.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Node::Element(el) => el.name(),
            Node::Text(_) => TEXT_NODE_NAME,
        }
    }

    /// The element, if this node is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Concatenated descendant text, depth-first, left to right.
    #[must_use]
    pub fn text_content(&self) -> String {
        match self {
            Node::Element(el) => el.text_content(),
            Node::Text(text) => text.clone(),
        }
    }
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    id: Option<String>,
    class: Option<String>,
    children: Vec<Node>,
}

impl Element {
    /// Create an empty element. The tag name is stored uppercase.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_uppercase(),
            id: None,
            class: None,
            children: Vec::new(),
        }
    }

    /// Builder-style `id` setter.
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Builder-style `class` setter.
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    /// Builder-style child append.
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Builder-style text child append.
    #[must_use]
    pub fn with_text(self, text: &str) -> Self {
        self.with_child(Node::Text(text.to_string()))
    }

    pub(crate) fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    pub(crate) fn set_class(&mut self, class: Option<String>) {
        self.class = class;
    }

    pub(crate) fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Tag name, uppercase.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive tag comparison.
    #[must_use]
    pub fn is(&self, tag: &str) -> bool {
        self.name.eq_ignore_ascii_case(tag)
    }

    /// The `id` attribute.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The `class` attribute, unsplit.
    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// Ordered children.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child elements, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// This element and every element below it, in pre-order.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Concatenated descendant text, depth-first, left to right.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out, false);
        out
    }

    /// Text content with whitespace collapsed to single spaces and trimmed.
    ///
    /// Block-level element boundaries count as whitespace, so
    /// `<p>a</p><p>b</p>` reads `"a b"` rather than `"ab"`.
    #[must_use]
    pub fn normalized_text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out, true);
        normalize_whitespace(&out)
    }

    /// All elements named `tag` (case-insensitive), in pre-order.
    ///
    /// The walk starts at `self`, so the receiver is included when it matches.
    #[must_use]
    pub fn get_elements_by_tag_name(&self, tag: &str) -> Vec<&Element> {
        self.descendants().filter(|el| el.is(tag)).collect()
    }

    /// First match for a bare tag-name selector.
    ///
    /// Class (`.x`) and id (`#x`) selectors are not supported and yield `None`.
    #[must_use]
    pub fn query_selector(&self, selector: &str) -> Option<&Element> {
        let tag = bare_tag_selector(selector)?;
        self.descendants().find(|el| el.is(tag))
    }

    /// All matches for a bare tag-name selector; empty for unsupported selectors.
    #[must_use]
    pub fn query_selector_all(&self, selector: &str) -> Vec<&Element> {
        bare_tag_selector(selector)
            .map(|tag| self.get_elements_by_tag_name(tag))
            .unwrap_or_default()
    }
}

/// Pre-order iterator over an element subtree.
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let el = self.stack.pop()?;
        self.stack.extend(el.child_elements().collect::<Vec<_>>().into_iter().rev());
        Some(el)
    }
}

/// Whether an element named `name` separates words when text is flattened.
pub(crate) fn is_block_tag(name: &str) -> bool {
    BLOCK_TAGS.iter().any(|tag| tag.eq_ignore_ascii_case(name))
}

fn collect_text(el: &Element, out: &mut String, block_breaks: bool) {
    let breaks = block_breaks && is_block_tag(el.name());
    if breaks {
        out.push(' ');
    }
    for child in &el.children {
        match child {
            Node::Text(text) => out.push_str(text),
            Node::Element(child) => collect_text(child, out, block_breaks),
        }
    }
    if breaks {
        out.push(' ');
    }
}

fn bare_tag_selector(selector: &str) -> Option<&str> {
    let selector = selector.trim();
    if selector.is_empty() || !selector.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return None;
    }
    Some(selector)
}

/// A parsed document: the `HTML` root plus whether parsing degraded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
    degraded: bool,
}

impl Document {
    pub(crate) fn new(root: Element, degraded: bool) -> Self {
        Self { root, degraded }
    }

    /// The shim returned when markup could not be parsed: `HTML > HEAD, BODY`.
    #[must_use]
    pub fn empty() -> Self {
        let root = Element::new("HTML")
            .with_child(Node::Element(Element::new("HEAD")))
            .with_child(Node::Element(Element::new("BODY")));
        Self::new(root, true)
    }

    /// True when the structural parse failed and this is the empty shim.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// The document element (`HTML`).
    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// The first `BODY` element.
    #[must_use]
    pub fn body(&self) -> Option<&Element> {
        self.root.query_selector("body")
    }

    /// Trimmed text of the first `TITLE`, if present and non-empty.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        self.root
            .query_selector("title")
            .map(|title| title.text_content().trim().to_string())
            .filter(|title| !title.is_empty())
    }

    /// See [`Element::get_elements_by_tag_name`]; the root is included.
    #[must_use]
    pub fn get_elements_by_tag_name(&self, tag: &str) -> Vec<&Element> {
        self.root.get_elements_by_tag_name(tag)
    }

    /// See [`Element::query_selector`].
    #[must_use]
    pub fn query_selector(&self, selector: &str) -> Option<&Element> {
        self.root.query_selector(selector)
    }

    /// See [`Element::query_selector_all`].
    #[must_use]
    pub fn query_selector_all(&self, selector: &str) -> Vec<&Element> {
        self.root.query_selector_all(selector)
    }

    /// Concatenated text of the whole document.
    #[must_use]
    pub fn text_content(&self) -> String {
        self.root.text_content()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let body = Element::new("body")
            .with_child(Node::Element(
                Element::new("div")
                    .with_id("main")
                    .with_child(Node::Element(Element::new("p").with_text("one")))
                    .with_child(Node::Element(
                        Element::new("p")
                            .with_text("two ")
                            .with_child(Node::Element(Element::new("b").with_text("bold"))),
                    )),
            ))
            .with_child(Node::Element(Element::new("p").with_text("three")));
        let root = Element::new("html")
            .with_child(Node::Element(
                Element::new("head")
                    .with_child(Node::Element(Element::new("title").with_text("  A title "))),
            ))
            .with_child(Node::Element(body));
        Document::new(root, false)
    }

    #[test]
    fn tag_names_are_uppercase() {
        let el = Element::new("article");
        assert_eq!(el.name(), "ARTICLE");
        assert!(el.is("Article"));
        assert_eq!(Node::Text("x".into()).name(), TEXT_NODE_NAME);
    }

    #[test]
    fn get_elements_by_tag_name_is_preorder_and_case_insensitive() {
        let doc = sample();
        let paras: Vec<String> = doc
            .get_elements_by_tag_name("p")
            .iter()
            .map(|p| p.text_content())
            .collect();
        assert_eq!(paras, vec!["one", "two bold", "three"]);
        assert_eq!(doc.get_elements_by_tag_name("HTML").len(), 1);
    }

    #[test]
    fn text_content_concatenates_depth_first() {
        let doc = sample();
        let body = doc.body().map(Element::text_content);
        assert_eq!(body.as_deref(), Some("onetwo boldthree"));
    }

    #[test]
    fn normalized_text_breaks_on_blocks() {
        let doc = sample();
        let body = doc.body().map(Element::normalized_text);
        assert_eq!(body.as_deref(), Some("one two bold three"));
    }

    #[test]
    fn query_selector_only_supports_bare_tags() {
        let doc = sample();
        assert_eq!(doc.query_selector("div").and_then(Element::id), Some("main"));
        assert!(doc.query_selector("#main").is_none());
        assert!(doc.query_selector(".content").is_none());
        assert!(doc.query_selector_all(".content").is_empty());
        assert_eq!(doc.query_selector_all("p").len(), 3);
    }

    #[test]
    fn title_is_trimmed() {
        assert_eq!(sample().title().as_deref(), Some("A title"));
        assert!(Document::empty().title().is_none());
    }

    #[test]
    fn empty_shim_has_a_body() {
        let doc = Document::empty();
        assert!(doc.is_degraded());
        assert!(doc.body().is_some());
        assert!(doc.text_content().is_empty());
    }
}
