//! Whitespace and length helpers shared by extraction and summarization.
//!
//! All lengths are counted in `char`s, never bytes, so truncation never
//! splits a UTF-8 sequence.

use crate::patterns::WHITESPACE;

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Words per minute used for reading-time estimates.
pub const WORDS_PER_MINUTE: usize = 200;

/// Collapse every whitespace run to one space and trim the ends.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// The first `max_chars` characters of `text`.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// The first `max_chars` characters, plus [`ELLIPSIS`] iff anything was cut.
///
/// ```
/// use article_digest::text::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("abcdef", 3), "abc...");
/// assert_eq!(truncate_with_ellipsis("abc", 3), "abc");
/// ```
#[must_use]
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    let head = truncate_chars(text, max_chars);
    if head.len() < text.len() {
        format!("{head}{ELLIPSIS}")
    } else {
        head.to_string()
    }
}

/// Number of whitespace-separated words.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Minutes to read `words` words, rounded up; zero words read in zero minutes.
#[must_use]
pub fn reading_time_minutes(words: usize) -> usize {
    words.div_ceil(WORDS_PER_MINUTE)
}
