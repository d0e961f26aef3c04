//! In-memory durable store.
//!
//! This module provides:
//! - [`MemoryStore`] — Thread-safe append-only record storage
//!
//! The in-memory backend keeps every saved record for the life of the
//! process. It is the default backend and the one used throughout tests.

use parking_lot::RwLock;

use logbook_core::{LogRecord, SearchSpec};

use crate::error::StoreResult;
use crate::traits::DurableStore;

/// Thread-safe in-memory record storage.
///
/// Records are held in insertion order; reads sort by timestamp so results
/// come back newest first regardless of arrival order.
pub struct MemoryStore {
    records: RwLock<Vec<LogRecord>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Returns the number of stored records across all users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns true if no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Returns the number of records stored for one user.
    #[must_use]
    pub fn count_for_user(&self, user_id: &str) -> usize {
        self.records
            .read()
            .iter()
            .filter(|r| r.user_id == user_id)
            .count()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DurableStore for MemoryStore {
    fn save(&self, record: &LogRecord) -> StoreResult<()> {
        self.records.write().push(record.clone());
        Ok(())
    }

    fn fetch_by_user(&self, user_id: &str, limit: usize) -> StoreResult<Vec<LogRecord>> {
        let records = self.records.read();
        let mut results: Vec<LogRecord> = records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();

        results.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        results.truncate(limit);
        Ok(results)
    }

    fn search(&self, user_id: &str, spec: &SearchSpec) -> StoreResult<Vec<LogRecord>> {
        let matcher = spec.compile()?;

        let records = self.records.read();
        let mut results: Vec<LogRecord> = records
            .iter()
            .filter(|r| r.user_id == user_id && matcher.matches(r))
            .cloned()
            .collect();

        results.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(results)
    }

    fn fetch_by_id(&self, user_id: &str, log_id: &str) -> StoreResult<Option<LogRecord>> {
        let records = self.records.read();
        Ok(records
            .iter()
            .find(|r| r.user_id == user_id && r.log_id == log_id)
            .cloned())
    }
}
