//! URL Utility Functions
//!
//! Reference resolution against a document base URL. Relative references
//! go through `url::Url::join`; references that already carry a scheme,
//! and references that cannot be resolved, are returned unchanged.

use percent_encoding::percent_decode_str;
use url::Url;

/// Parse a string that is an absolute URL on its own.
fn parse_absolute(s: &str) -> Option<Url> {
    Url::parse(s).ok()
}

/// Resolve `reference` against an already parsed base.
fn join(base: &Url, reference: &str) -> String {
    if parse_absolute(reference).is_some() {
        return reference.to_string();
    }
    match base.join(reference) {
        Ok(url) => url.into(),
        Err(err) => {
            tracing::trace!(reference, error = %err, "reference not resolvable");
            reference.to_string()
        }
    }
}

/// Resolve a URI reference against a base URI.
///
/// An empty or unparseable base, or a reference that already carries a
/// scheme, yields the reference unchanged.
///
/// # Examples
///
/// ```
/// use mf2_parser::url_utils::resolve_url;
///
/// assert_eq!(resolve_url("http://example.com/a/", "../b"), "http://example.com/b");
/// assert_eq!(resolve_url("http://example.com/a/b?q", "#top"), "http://example.com/a/b?q#top");
/// assert_eq!(resolve_url("", "relative/path"), "relative/path");
/// ```
#[must_use]
pub fn resolve_url(base: &str, reference: &str) -> String {
    match parse_absolute(base) {
        Some(base) => join(&base, reference),
        None => reference.to_string(),
    }
}

/// Resolves references against an optional document base URL.
#[derive(Debug, Clone, Default)]
pub struct UrlResolver {
    base: Option<String>,
    parsed: Option<Url>,
}

impl UrlResolver {
    /// Create a resolver; an empty base behaves like no base.
    #[must_use]
    pub fn new(base: Option<&str>) -> Self {
        let base = base.map(str::trim).filter(|b| !b.is_empty()).map(str::to_string);
        let parsed = base.as_deref().and_then(parse_absolute);
        Self { base, parsed }
    }

    /// The effective base URL.
    #[must_use]
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// Resolve one attribute value (surrounding whitespace is ignored).
    #[must_use]
    pub fn resolve(&self, url: &str) -> String {
        let url = url.trim();
        match &self.parsed {
            Some(base) => join(base, url),
            None => url.to_string(),
        }
    }

    /// Resolve each candidate of a `srcset` list, keeping descriptors.
    #[must_use]
    pub fn resolve_srcset(&self, srcset: &str) -> String {
        srcset
            .split(',')
            .map(str::trim)
            .filter(|candidate| !candidate.is_empty())
            .map(|candidate| match candidate.split_once(char::is_whitespace) {
                Some((url, descriptor)) => format!("{} {}", self.resolve(url), descriptor.trim()),
                None => self.resolve(candidate),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Last non-empty path segment of a URL, percent-decoded.
///
/// Used as the value of `rel=tag` links: `http://example.com/tags/rust/` → `rust`.
#[must_use]
pub fn last_path_segment(href: &str) -> String {
    let href = href.trim();
    let path = match parse_absolute(href) {
        Some(url) => url.path().to_string(),
        None => href.split(['?', '#']).next().unwrap_or_default().to_string(),
    };
    let segment = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}
