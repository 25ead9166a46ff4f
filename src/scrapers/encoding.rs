//! Response body decoding.
//!
//! The charset is taken from, in order: a byte order mark, the
//! `Content-Type` header's `charset` parameter, a `<meta charset>` or
//! `<meta http-equiv="Content-Type">` declaration in the first 1024 bytes,
//! and finally UTF-8. Undecodable bytes become U+FFFD.

use encoding_rs::{Encoding, UTF_8};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// How far into the body a `<meta>` charset declaration is looked for.
const META_PRESCAN_BYTES: usize = 1024;

/// Covers both `<meta charset=...>` and the `charset=` inside an
/// `http-equiv` content attribute.
static META_CHARSET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?\s*([^"'\s>;/]+)"#)
        .expect("meta charset regex is valid")
});

/// `charset` parameter of a `Content-Type` header value.
fn header_charset(content_type: &str) -> Option<&'static Encoding> {
    content_type
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("charset"))
        .and_then(|(_, value)| Encoding::for_label(value.trim().trim_matches(['"', '\'']).as_bytes()))
}

/// Charset declared by a `<meta>` tag near the top of the document.
fn meta_charset(body: &[u8]) -> Option<&'static Encoding> {
    let head = String::from_utf8_lossy(&body[..body.len().min(META_PRESCAN_BYTES)]);
    META_CHARSET_RE
        .captures(&head)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
}

/// Decode a response body to a `String`.
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(header_charset)
        .or_else(|| meta_charset(body))
        .unwrap_or(UTF_8);

    // `decode` lets a BOM override the chosen encoding
    let (text, used, had_errors) = encoding.decode(body);
    if used != UTF_8 || had_errors {
        debug!(encoding = used.name(), had_errors, "Decoded response body");
    }
    text.into_owned()
}
