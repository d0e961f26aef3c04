//! Traits for recency cache backends.
//!
//! This module provides the [`RecencyCache`] trait for abstracting over
//! cache implementations (in-memory, external key-value stores, etc.).

use logbook_core::{LogRecord, SearchSpec};

use crate::error::CacheResult;

/// A slice of a user's cached sequence, plus the sequence's full length.
///
/// `total` counts every raw entry in the sequence, decodable or not, so
/// pagination stays stable even when individual entries are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachedPage {
    /// Decoded records from the requested slice, newest first.
    pub records: Vec<LogRecord>,
    /// Length of the user's whole cached sequence.
    pub total: usize,
}

impl CachedPage {
    /// An empty page with a zero total.
    ///
    /// This is what reads return for an absent or expired user sequence.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            records: Vec::new(),
            total: 0,
        }
    }
}

/// Trait for recency cache backends.
///
/// Each user owns an independent sequence of serialized records ordered
/// newest first. Implementations bound each sequence and expire it as a
/// whole; an expired or absent sequence reads as empty, never as an error.
pub trait RecencyCache: Send + Sync {
    /// Inserts a record at the head of its user's sequence.
    ///
    /// Refreshes the sequence's expiry and evicts the oldest entries once
    /// the per-user cap is exceeded.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized or the backend
    /// cannot be reached.
    fn put(&self, record: &LogRecord) -> CacheResult<()>;

    /// Reads a slice of the user's sequence.
    ///
    /// The slice is taken over raw entries before decoding, so a page may
    /// hold fewer than `limit` records when entries fail to decode. The
    /// returned total always counts the whole sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    fn page(&self, user_id: &str, offset: usize, limit: usize) -> CacheResult<CachedPage>;

    /// Returns every cached record of the user that matches the spec.
    ///
    /// # Errors
    ///
    /// Returns an error if the spec does not compile or the backend cannot
    /// be reached.
    fn search(&self, user_id: &str, spec: &SearchSpec) -> CacheResult<Vec<LogRecord>>;

    /// Looks up a single record by ID within the user's sequence.
    ///
    /// Returns `None` when the record is not cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    fn find(&self, user_id: &str, log_id: &str) -> CacheResult<Option<LogRecord>>;

    /// Removes expired user sequences, returning how many were dropped.
    ///
    /// Reads already treat expired sequences as absent; this only reclaims
    /// their memory.
    fn evict_expired(&self) -> usize;
}
