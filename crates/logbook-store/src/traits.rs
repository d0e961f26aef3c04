//! Traits for durable storage backends.
//!
//! This module provides the [`DurableStore`] trait for abstracting over
//! persistence implementations (in-memory, file-based, etc.).

use logbook_core::{LogRecord, SearchSpec};

use crate::error::StoreResult;

/// Trait for durable log record storage.
///
/// The store is the system of record: it keeps every saved record, with no
/// per-user cap and no expiry. All multi-record reads return records in
/// reverse chronological order (newest first).
pub trait DurableStore: Send + Sync {
    /// Persists a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn save(&self, record: &LogRecord) -> StoreResult<()>;

    /// Returns up to `limit` of the user's newest records.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn fetch_by_user(&self, user_id: &str, limit: usize) -> StoreResult<Vec<LogRecord>>;

    /// Returns every record of the user that matches the spec.
    ///
    /// # Errors
    ///
    /// Returns an error if the spec does not compile or the backend cannot
    /// be read.
    fn search(&self, user_id: &str, spec: &SearchSpec) -> StoreResult<Vec<LogRecord>>;

    /// Looks up a single record by ID within the user's records.
    ///
    /// Returns `None` if the record does not exist or belongs to another
    /// user.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn fetch_by_id(&self, user_id: &str, log_id: &str) -> StoreResult<Option<LogRecord>>;
}
