//! Configuration options for microformats parsing.
//!
//! The `Options` struct controls URL resolution, legacy upgrading, optional
//! output sections, and the resource limits applied to a single parse.

/// Configuration options for a parse.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use mf2_parser::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     base_url: Some("https://example.com/notes/".to_string()),
///     upgrade_classic: false,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// URL of the document, used to resolve relative `u-*` values, rel
    /// links and URLs inside `e-*` markup.
    ///
    /// A `<base href>` in the document is resolved against this value and
    /// takes precedence over it.
    ///
    /// Default: `None` (relative references are returned unchanged)
    pub base_url: Option<String>,

    /// Upgrade classic microformats (`vcard`, `hentry`, ...) to their
    /// microformats2 equivalents before parsing.
    ///
    /// Default: `true`
    pub upgrade_classic: bool,

    /// Collect `rel=alternate` links into `ParseResult::alternates`
    /// instead of `rels`/`rel-urls`.
    ///
    /// Default: `false`
    pub enable_alternates: bool,

    /// Annotate items and `e-*` values with the `lang` in effect.
    ///
    /// Default: `false`
    pub include_lang: bool,

    /// Maximum depth of nested microformat roots.
    ///
    /// Exceeding it aborts the parse with `Error::NestingTooDeep`.
    ///
    /// Default: `64`
    pub max_nesting_depth: usize,

    /// Maximum number of elements in the document.
    ///
    /// Default: `None` (unlimited)
    pub max_elements: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            base_url: None,
            upgrade_classic: true,
            enable_alternates: false,
            include_lang: false,
            max_nesting_depth: 64,
            max_elements: None,
        }
    }
}
