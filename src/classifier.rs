//! Non-article domain classification.
//!
//! A URL is a non-article destination when its hostname contains any entry of
//! the configured [`NonArticleDomainSet`]. Matching is a case-insensitive
//! substring test, so `youtube.com` also matches `m.youtube.com` (and, being
//! loose, `notyoutube.com`).

use serde::{Deserialize, Serialize};

use crate::url_utils::hostname;

/// Video, social and search hosts shipped as the default set.
pub const DEFAULT_NON_ARTICLE_DOMAINS: &[&str] = &[
    "youtube.com",
    "youtu.be",
    "vimeo.com",
    "dailymotion.com",
    "twitch.tv",
    "twitter.com",
    "x.com",
    "facebook.com",
    "instagram.com",
    "tiktok.com",
    "google.com",
    "bing.com",
    "pinterest.com",
    "reddit.com",
    "linkedin.com",
    "duckduckgo.com",
];

/// Ordered, de-duplicated set of host substrings.
///
/// Owned and edited by the configuration layer; the classifier only reads it.
/// Entries are stored trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct NonArticleDomainSet {
    entries: Vec<String>,
}

impl Default for NonArticleDomainSet {
    fn default() -> Self {
        DEFAULT_NON_ARTICLE_DOMAINS.iter().copied().collect()
    }
}

impl NonArticleDomainSet {
    /// An empty set; nothing is classified as non-article.
    #[must_use]
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// Append `domain`. Returns false for blanks and duplicates.
    pub fn insert(&mut self, domain: &str) -> bool {
        let domain = domain.trim().to_ascii_lowercase();
        if domain.is_empty() || self.entries.contains(&domain) {
            return false;
        }
        self.entries.push(domain);
        true
    }

    /// Remove `domain`. Returns whether it was present.
    pub fn remove(&mut self, domain: &str) -> bool {
        let domain = domain.trim().to_ascii_lowercase();
        let before = self.entries.len();
        self.entries.retain(|d| *d != domain);
        self.entries.len() != before
    }

    /// Replace the contents with [`DEFAULT_NON_ARTICLE_DOMAINS`].
    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }

    /// Whether `domain` is an entry (exact, case-insensitive).
    #[must_use]
    pub fn contains_entry(&self, domain: &str) -> bool {
        let domain = domain.trim().to_ascii_lowercase();
        self.entries.contains(&domain)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry contained in `host` (already lowercased).
    #[must_use]
    pub fn matching_entry(&self, host: &str) -> Option<&str> {
        self.iter().find(|entry| host.contains(entry))
    }
}

impl<'a> FromIterator<&'a str> for NonArticleDomainSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::empty();
        for domain in iter {
            set.insert(domain);
        }
        set
    }
}

impl From<Vec<String>> for NonArticleDomainSet {
    fn from(domains: Vec<String>) -> Self {
        domains.iter().map(String::as_str).collect()
    }
}

impl From<NonArticleDomainSet> for Vec<String> {
    fn from(set: NonArticleDomainSet) -> Self {
        set.entries
    }
}

/// Whether `url`'s hostname contains any entry of `domains`.
///
/// Unparseable URLs are never non-article.
///
/// ```
/// use article_digest::{is_non_article_domain, NonArticleDomainSet};
///
/// let domains = NonArticleDomainSet::default();
/// assert!(is_non_article_domain("https://m.YouTube.com/watch?v=x", &domains));
/// assert!(!is_non_article_domain("https://blog.rust-lang.org/", &domains));
/// ```
#[must_use]
pub fn is_non_article_domain(url: &str, domains: &NonArticleDomainSet) -> bool {
    let Some(host) = hostname(url) else {
        tracing::debug!(url, "unparseable URL treated as article");
        return false;
    };
    match domains.matching_entry(&host) {
        Some(entry) => {
            tracing::debug!(host, entry, "non-article domain");
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_is_ordered_and_complete() {
        let set = NonArticleDomainSet::default();
        assert_eq!(set.len(), DEFAULT_NON_ARTICLE_DOMAINS.len());
        assert_eq!(set.iter().next(), Some("youtube.com"));
        assert_eq!(set.iter().last(), Some("duckduckgo.com"));
    }

    #[test]
    fn insert_normalizes_and_rejects_duplicates() {
        let mut set = NonArticleDomainSet::empty();
        assert!(set.insert("  Example.COM "));
        assert!(!set.insert("example.com"));
        assert!(!set.insert("   "));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["example.com"]);
    }

    #[test]
    fn remove_and_reset() {
        let mut set = NonArticleDomainSet::default();
        assert!(set.remove("YOUTUBE.com"));
        assert!(!set.remove("youtube.com"));
        assert!(!is_non_article_domain("https://youtube.com/watch", &set));
        set.reset_to_defaults();
        assert!(is_non_article_domain("https://youtube.com/watch", &set));
    }

    #[test]
    fn substring_match_is_loose() {
        let set: NonArticleDomainSet = ["x.com"].into_iter().collect();
        assert!(is_non_article_domain("https://x.com/someone", &set));
        // loose by design of the match rule
        assert!(is_non_article_domain("https://box.com/file", &set));
    }

    #[test]
    fn path_and_query_are_not_consulted() {
        let set = NonArticleDomainSet::default();
        assert!(!is_non_article_domain("https://example.org/youtube.com", &set));
        assert!(!is_non_article_domain("https://example.org/?u=reddit.com", &set));
    }

    #[test]
    fn unparseable_url_is_article() {
        assert!(!is_non_article_domain("youtube.com", &NonArticleDomainSet::default()));
    }

    #[test]
    fn serde_round_trips_as_a_list() {
        let json = r#"["Vimeo.com","vimeo.com","example.net"]"#;
        let set: NonArticleDomainSet = match serde_json::from_str(json) {
            Ok(set) => set,
            Err(err) => panic!("valid json: {err}"),
        };
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["vimeo.com", "example.net"]);
    }
}
