//! URL helpers for classification and provider lookups.

use url::Url;

use crate::error::{Error, Result};

/// Parse an absolute `http`/`https` URL with a host.
///
/// ```
/// use article_digest::url_utils::parse_absolute;
///
/// assert!(parse_absolute("https://example.com/a").is_ok());
/// assert!(parse_absolute("/relative/path").is_err());
/// assert!(parse_absolute("ftp://example.com/").is_err());
/// ```
pub fn parse_absolute(s: &str) -> Result<Url> {
    let s = s.trim();
    let url = Url::parse(s).map_err(|e| Error::InvalidUrl(format!("{s}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl(format!("{s}: unsupported scheme {}", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(Error::InvalidUrl(format!("{s}: missing host")));
    }
    Ok(url)
}

/// Lowercased hostname of an absolute URL, trailing dot removed.
#[must_use]
pub fn hostname(s: &str) -> Option<String> {
    let url = Url::parse(s.trim()).ok()?;
    let host = url.host_str()?.trim_end_matches('.').to_ascii_lowercase();
    (!host.is_empty()).then_some(host)
}

/// Last non-empty path segment, percent-decoded.
///
/// `https://en.wikipedia.org/wiki/Rust_(programming_language)` yields
/// `Rust_(programming_language)`.
#[must_use]
pub fn last_path_segment(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.filter(|s| !s.is_empty()).last()?;
    let decoded = urlencoding::decode(segment).map_or_else(|_| segment.to_string(), |s| s.into_owned());
    (!decoded.is_empty()).then_some(decoded)
}
