//! Error types for code-callouts library.
//!
//! The tree transform itself never fails; errors only come from the
//! JSON boundary and from user-supplied marker tables.

use thiserror::Error;

/// Result type alias for code-callouts operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around the annotation transform.
#[derive(Error, Debug)]
pub enum Error {
    /// Input JSON could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The parsed document is not a root node.
    #[error("Invalid tree: {0}")]
    InvalidTree(String),

    /// A comment-marker table entry is unusable.
    #[error("Invalid marker table: {0}")]
    InvalidMarkerTable(String),

    /// Error serializing a tree or registry.
    #[error("Serialization error: {0}")]
    Serialize(String),
}
