//! # mf2-parser
//!
//! A microformats2 parser.
//!
//! This library finds `h-*` roots in an HTML document, extracts their
//! `p-*`, `u-*`, `dt-*` and `e-*` properties, implies `name`, `photo` and
//! `url` where none were authored, upgrades classic microformats (`vcard`,
//! `hentry`, ...) and indexes every `rel` link. The output serializes to the
//! canonical microformats2 JSON.
//!
//! ## Quick Start
//!
//! ```rust
//! use mf2_parser::parse;
//!
//! let html = r#"<a class="h-card" href="https://jane.example/">Jane Doe</a>"#;
//!
//! let result = parse(html)?;
//! let card = &result.items[0];
//! assert_eq!(card.types, vec!["h-card"]);
//! assert_eq!(card.first_str("name"), Some("Jane Doe"));
//! assert_eq!(card.first_str("url"), Some("https://jane.example/"));
//! # Ok::<(), mf2_parser::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Explicit properties**: all four property prefixes, value-class pattern
//! - **Date/time assembly**: split date, time and timezone parts, implied timezones
//! - **Implied properties**: `name`, `photo` and `url` from the root's markup
//! - **Classic microformats**: upgraded in place before extraction
//! - **Rel index**: `rels`, `rel-urls` and optional `alternates`

mod error;
mod options;
mod patterns;
mod result;

/// DOM helpers over `dom_query` (class tokens, attributes, traversal).
pub mod dom;

/// URL resolution against a base URL.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Microformats parsing engine (root walking, properties, rels).
pub mod parser;

/// Classic microformat upgrading.
pub mod backcompat;

// Public API - re-exports
pub use error::{Error, Result};
pub use options::Options;
pub use parser::parse_context;
pub use result::{Alternate, Item, ParseResult, Properties, PropertyValue, RelUrl};

use dom_query::Document;

/// Parses an HTML document using default options.
///
/// # Example
///
/// ```rust
/// use mf2_parser::parse;
///
/// let result = parse(r#"<div class="h-entry"><p class="p-name">Hello</p></div>"#)?;
/// assert_eq!(result.items[0].first_str("name"), Some("Hello"));
/// # Ok::<(), mf2_parser::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn parse(html: &str) -> Result<ParseResult> {
    parse_with_options(html, &Options::default())
}

/// Parses an HTML document with custom options.
///
/// # Example
///
/// ```rust
/// use mf2_parser::{parse_with_options, Options};
///
/// let html = r#"<a class="h-card" href="/me">Me</a>"#;
/// let options = Options {
///     base_url: Some("https://example.com/".to_string()),
///     ..Options::default()
/// };
/// let result = parse_with_options(html, &options)?;
/// assert_eq!(result.items[0].first_str("url"), Some("https://example.com/me"));
/// # Ok::<(), mf2_parser::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn parse_with_options(html: &str, options: &Options) -> Result<ParseResult> {
    let doc = dom::parse(html);
    parse_document(&doc, options)
}

/// Parses HTML bytes with automatic encoding detection.
///
/// The encoding is taken from a byte order mark, `<meta charset>` or a
/// `Content-Type` `http-equiv` declaration, defaulting to UTF-8. Invalid
/// sequences are replaced with U+FFFD.
///
/// # Example
///
/// ```rust
/// use mf2_parser::{parse_bytes, Options};
///
/// let html = b"<meta charset=\"ISO-8859-1\"><p class=\"h-card\">Caf\xE9</p>";
/// let result = parse_bytes(html, &Options::default())?;
/// assert_eq!(result.items[0].first_str("name"), Some("Café"));
/// # Ok::<(), mf2_parser::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn parse_bytes(html: &[u8], options: &Options) -> Result<ParseResult> {
    let html = encoding::decode_html(html);
    parse_with_options(&html, options)
}

/// Parses a document the caller already holds.
///
/// Classic microformats are upgraded by adding classes to the document's
/// elements, so the caller's DOM is modified when `upgrade_classic` is on.
#[allow(clippy::missing_errors_doc)]
pub fn parse_document(doc: &Document, options: &Options) -> Result<ParseResult> {
    parse_context(doc, &doc.root(), options)
}
