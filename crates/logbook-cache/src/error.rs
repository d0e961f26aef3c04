//! Error types for the recency cache.

use thiserror::Error;

/// Errors that can occur in a recency cache backend.
#[derive(Debug, Error)]
pub enum CacheError {
    /// A record could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The search query could not be compiled.
    #[error("search error: {0}")]
    Search(#[from] logbook_core::SearchError),

    /// The cache backend could not be reached.
    #[error("cache unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;
