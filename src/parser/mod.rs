//! Microformats parsing engine.
//!
//! # Module Structure
//!
//! - `walker`: root discovery, recursion into nested roots, item assembly
//! - `properties`: `p-*`/`u-*`/`dt-*`/`e-*` extraction for one root
//! - `value_class`: the value-class pattern
//! - `datetime`: `dt-*` value assembly and normalization
//! - `implied`: implied `name`/`photo`/`url`
//! - `rels`: the document-wide rel index
//! - `text`: text rendering and markup serialization
//! - `state`: consumption and upgrade tables
//!
//! # Usage
//!
//! ```rust
//! use dom_query::Document;
//! use mf2_parser::{parser, Options};
//!
//! let doc = Document::from(r#"<div class="h-card"><p class="p-name">Jane</p></div>"#);
//! let result = parser::parse_context(&doc, &doc.root(), &Options::default())?;
//! assert_eq!(result.items[0].first_str("name"), Some("Jane"));
//! # Ok::<(), mf2_parser::Error>(())
//! ```

pub mod datetime;
pub mod implied;
pub mod properties;
pub mod rels;
pub mod state;
pub mod text;
pub mod value_class;
pub mod walker;

pub use state::{ParseState, Prefix};
pub use walker::parse_context;

use crate::url_utils::UrlResolver;
use crate::Options;

/// Everything one parse threads through its recursive calls.
#[derive(Debug)]
pub struct ParseContext<'o> {
    pub options: &'o Options,
    /// Resolver for the effective base URL.
    pub urls: UrlResolver,
    pub state: ParseState,
    /// Document language from `<html lang>` or a content-language meta tag.
    pub document_lang: Option<String>,
}

impl<'o> ParseContext<'o> {
    #[must_use]
    pub fn new(options: &'o Options, urls: UrlResolver, document_lang: Option<String>) -> Self {
        Self {
            options,
            urls,
            state: ParseState::default(),
            document_lang,
        }
    }
}
