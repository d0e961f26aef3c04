//! File-backed durable store.
//!
//! This module provides:
//! - [`FileStore`] — Persistent record storage in JSON-lines format
//!
//! Every record is appended as one JSON line and flushed immediately.
//! Reads scan the whole file; lines that fail to parse are skipped so one
//! bad line cannot poison the rest of the file.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::debug;

use logbook_core::{LogRecord, SearchSpec};

use crate::error::StoreResult;
use crate::traits::DurableStore;

/// Durable store backed by a single JSON-lines file.
///
/// Lookups are O(n) over the file. The store sits behind the recency cache
/// in normal operation, so scans are the slow path by design of the read
/// flow, not a per-request cost.
pub struct FileStore {
    path: PathBuf,
    /// Serializes appends against scans of the same file.
    lock: RwLock<()>,
}

impl FileStore {
    /// Opens a file store at the given path, creating parent directories
    /// as needed. The file itself is created on first save.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn new(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        Ok(Self {
            path,
            lock: RwLock::new(()),
        })
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every parseable record from the backing file.
    fn load_records(&self) -> StoreResult<Vec<LogRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for line in reader.lines() {
            let line = line?;
            match serde_json::from_str::<LogRecord>(&line) {
                Ok(record) => records.push(record),
                Err(_) => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!(skipped, path = %self.path.display(), "skipped unparseable store lines");
        }

        Ok(records)
    }
}

impl DurableStore for FileStore {
    fn save(&self, record: &LogRecord) -> StoreResult<()> {
        let json = serde_json::to_string(record)?;
        let line = format!("{json}\n");

        let _guard = self.lock.write();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(line.as_bytes())?;
        writer.flush()?;

        Ok(())
    }

    fn fetch_by_user(&self, user_id: &str, limit: usize) -> StoreResult<Vec<LogRecord>> {
        let _guard = self.lock.read();
        let mut results: Vec<LogRecord> = self
            .load_records()?
            .into_iter()
            .filter(|r| r.user_id == user_id)
            .collect();

        results.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        results.truncate(limit);
        Ok(results)
    }

    fn search(&self, user_id: &str, spec: &SearchSpec) -> StoreResult<Vec<LogRecord>> {
        let matcher = spec.compile()?;

        let _guard = self.lock.read();
        let mut results: Vec<LogRecord> = self
            .load_records()?
            .into_iter()
            .filter(|r| r.user_id == user_id && matcher.matches(r))
            .collect();

        results.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(results)
    }

    fn fetch_by_id(&self, user_id: &str, log_id: &str) -> StoreResult<Option<LogRecord>> {
        let _guard = self.lock.read();
        Ok(self
            .load_records()?
            .into_iter()
            .find(|r| r.user_id == user_id && r.log_id == log_id))
    }
}
