//! Charset sniffing and decoding of raw page bytes.
//!
//! Pages arrive from the fetcher as bytes. The declared charset is sniffed
//! from the first kilobyte and the body is decoded lossily to UTF-8, so
//! undecodable sequences become U+FFFD instead of failing the parse.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// Bytes examined for a charset declaration.
const SNIFF_WINDOW: usize = 1024;

/// `<meta charset="...">` or the `charset=` inside an `http-equiv` content value.
#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([A-Za-z0-9_\-:.]+)"#).expect("META_CHARSET regex")
});

/// Detect the declared character encoding, defaulting to UTF-8.
///
/// A UTF-8 byte-order mark wins over any declaration.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_WINDOW)]);
    META_CHARSET
        .captures(&head)
        .and_then(|caps| caps.get(1))
        .and_then(|label| Encoding::for_label(label.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode page bytes to a UTF-8 string.
///
/// ```
/// use article_digest::encoding::decode_html;
///
/// let html = b"<meta charset=\"ISO-8859-1\"><p>Caf\xE9</p>";
/// assert!(decode_html(html).contains("Café"));
/// ```
#[must_use]
pub fn decode_html(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    // decode() also strips a leading BOM
    let (decoded, _, had_errors) = encoding.decode(html);
    if had_errors {
        tracing::debug!(encoding = encoding.name(), "replaced undecodable bytes");
    }
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_utf8() {
        assert_eq!(detect_encoding(b"<html><body>Test</body></html>"), UTF_8);
    }

    #[test]
    fn meta_charset_is_honoured() {
        let html = br#"<html><head><meta charset="windows-1252"></head></html>"#;
        assert_eq!(detect_encoding(html).name(), "windows-1252");
    }

    #[test]
    fn http_equiv_charset_is_honoured() {
        let html = br#"<meta http-equiv="Content-Type" content="text/html; charset=ISO-8859-1">"#;
        // WHATWG maps ISO-8859-1 onto windows-1252
        assert_eq!(detect_encoding(html).name(), "windows-1252");
    }

    #[test]
    fn unknown_label_falls_back_to_utf8() {
        let html = br#"<meta charset="no-such-charset">"#;
        assert_eq!(detect_encoding(html), UTF_8);
    }

    #[test]
    fn smart_quotes_decode_from_windows_1252() {
        let html = b"<meta charset=\"windows-1252\"><p>\x93Hello\x94</p>";
        assert!(decode_html(html).contains("\u{201C}Hello\u{201D}"));
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let decoded = decode_html(b"<p>Test \xFF\xFE Invalid</p>");
        assert!(decoded.contains("Test"));
        assert!(decoded.contains('\u{FFFD}'));
    }
}
