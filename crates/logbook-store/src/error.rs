//! Error types for durable storage.

use thiserror::Error;

/// Errors that can occur in a durable store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The search query could not be compiled.
    #[error("search error: {0}")]
    Search(#[from] logbook_core::SearchError),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store backend could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
