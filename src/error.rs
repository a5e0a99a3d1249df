//! Error types for mf2-parser.
//!
//! Malformed markup never produces an error; the parser degrades by
//! omitting values. Only resource limits are fatal.

/// Error type for parse operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Microformat roots are nested deeper than `Options::max_nesting_depth`.
    #[error("microformat nesting depth {depth} exceeds limit of {limit}")]
    NestingTooDeep {
        /// Depth at which the limit was hit.
        depth: usize,
        /// Configured limit.
        limit: usize,
    },

    /// The document has more elements than `Options::max_elements`.
    #[error("document has {elements} elements, limit is {limit}")]
    DocumentTooLarge {
        /// Element count of the document.
        elements: usize,
        /// Configured limit.
        limit: usize,
    },

    /// JSON serialization of a result failed.
    #[error("JSON serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for parse operations.
pub type Result<T> = std::result::Result<T, Error>;
