//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur while building or reading a queue view.
#[derive(Debug, Error)]
pub enum Error {
    /// The request manager has persistence turned off, so no global
    /// request snapshot exists.
    #[error("Persistence is disabled; global requests are unavailable")]
    PersistenceDisabled,

    /// An accessor was called with a category it does not serve.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A serialized snapshot could not be decoded.
    #[error("Snapshot decode error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
