//! Error types for content filter registries.

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Registry error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A handler table could not be decoded or encoded.
    #[error("Handler table error: {0}")]
    Json(#[from] serde_json::Error),

    /// A handler names something that is not a bare `type/subtype`.
    #[error("Invalid handler type: {0:?}")]
    InvalidHandler(String),
}
