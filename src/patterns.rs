//! Compiled regex patterns for markup normalization and fallback stripping.
//!
//! All patterns are compiled once at first use via `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Normalization (applied before structural parsing)
// =============================================================================

/// Inline `<script>` blocks, tags and content.
pub static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("SCRIPT_BLOCK regex")
});

/// Inline `<style>` blocks, tags and content.
pub static STYLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").expect("STYLE_BLOCK regex")
});

/// HTML comments, including multi-line ones.
pub static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("HTML_COMMENT regex"));

/// An opening (or self-closing) start tag with its attribute list.
pub static START_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[A-Za-z][^<>]*>").expect("START_TAG regex"));

/// Bare attributes that lenient parsers choke on.
///
/// Quoted values match the first two alternatives and carry no groups, so
/// names inside them are never rewritten. Group 1 is the attribute name;
/// group 2 is present when it already carries a value.
pub static BARE_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)"[^"]*"|'[^']*'|\s(allowfullscreen|itemscope|data-nosnippet|news-link-class)\b(\s*=)?"#)
        .expect("BARE_ATTRIBUTE regex")
});

/// C0 control characters other than tab, newline and carriage return.
pub static CONTROL_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").expect("CONTROL_CHARS regex")
});

// =============================================================================
// Fallback text recovery
// =============================================================================

/// Any tag, used by the regex-only stripping tiers.
pub static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]+>").expect("ANY_TAG regex"));

/// `<title>` content for when no tree could be built.
pub static TITLE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").expect("TITLE_TAG regex")
});

/// Runs of whitespace.
pub static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE regex"));
