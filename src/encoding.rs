//! Character encoding detection and transcoding.
//!
//! Raw document bytes are decoded to UTF-8 before parsing. The charset comes
//! from a byte-order mark, then from the document's own meta declarations,
//! and defaults to UTF-8.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};

use crate::patterns::{CHARSET_META, CONTENT_TYPE_CHARSET};

/// Bytes examined for a meta charset declaration.
const SNIFF_LIMIT: usize = 1024;

/// Detect character encoding from HTML bytes.
///
/// Checks, in order:
/// 1. a UTF-8 or UTF-16 byte-order mark
/// 2. `<meta charset="...">`
/// 3. `<meta http-equiv="Content-Type" content="...; charset=...">`
///
/// Only the first 1024 bytes are scanned for meta tags.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LIMIT)]);

    [&*CHARSET_META, &*CONTENT_TYPE_CHARSET]
        .iter()
        .filter_map(|re| re.captures(&head).and_then(|c| c.get(1)))
        .find_map(|m| Encoding::for_label(m.as_str().as_bytes()))
        // A page that declares UTF-16 in ASCII-compatible bytes is really UTF-8.
        .map(Encoding::output_encoding)
        .unwrap_or(UTF_8)
}

/// Decode HTML bytes to a UTF-8 string.
///
/// Invalid sequences become U+FFFD rather than errors. The BOM, if any, is
/// stripped.
///
/// # Examples
///
/// ```
/// use mf2_parser::encoding::decode_html;
///
/// let html = b"<meta charset=\"windows-1252\"><p class=\"h-card\">Caf\xE9</p>";
/// assert!(decode_html(html).contains("Caf\u{e9}"));
/// ```
#[must_use]
pub fn decode_html(html: &[u8]) -> Cow<'_, str> {
    let encoding = detect_encoding(html);
    let (decoded, used, had_errors) = encoding.decode(html);
    if had_errors {
        tracing::debug!(encoding = used.name(), "replaced invalid byte sequences while decoding");
    }
    decoded
}
