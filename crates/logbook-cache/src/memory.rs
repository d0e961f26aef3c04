//! In-memory recency cache with per-user caps and TTL.
//!
//! This module provides:
//! - [`MemoryRecencyCache`] — Thread-safe per-user sequences of serialized records
//! - [`CacheConfig`] — Cap and TTL tuning
//!
//! Records are stored serialized, one JSON string per entry, so the cache
//! holds exactly what a key-value backend would hold. Reads slice the raw
//! sequence first and decode afterwards; entries that fail to decode are
//! skipped without failing the read.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::debug;

use logbook_core::{LogRecord, SearchSpec};

use crate::error::CacheResult;
use crate::traits::{CachedPage, RecencyCache};

/// Default cap on cached records per user.
pub const DEFAULT_MAX_RECORDS_PER_USER: usize = 100;

/// Default time-to-live for a user's sequence, in seconds.
pub const DEFAULT_TTL_SECS: u64 = 60;

/// Configuration for the in-memory recency cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum records kept per user; the oldest are evicted beyond this.
    pub max_records_per_user: usize,
    /// How long a user's sequence lives after its most recent write.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_records_per_user: DEFAULT_MAX_RECORDS_PER_USER,
            ttl: Duration::from_secs(DEFAULT_TTL_SECS),
        }
    }
}

impl CacheConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-user record cap.
    #[must_use]
    pub const fn with_max_records_per_user(mut self, max: usize) -> Self {
        self.max_records_per_user = max;
        self
    }

    /// Sets the sequence time-to-live.
    #[must_use]
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// One user's cached run of serialized records, newest first.
#[derive(Debug)]
struct UserSequence {
    entries: VecDeque<String>,
    expires_at: Instant,
}

impl UserSequence {
    const fn new(expires_at: Instant) -> Self {
        Self {
            entries: VecDeque::new(),
            expires_at,
        }
    }

    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// Thread-safe in-memory recency cache.
///
/// Expiry is lazy: reads treat an expired sequence as absent without
/// removing it, and [`evict_expired`](RecencyCache::evict_expired) reclaims
/// the memory later.
pub struct MemoryRecencyCache {
    config: CacheConfig,
    sequences: RwLock<HashMap<String, UserSequence>>,
}

impl MemoryRecencyCache {
    /// Creates a cache with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Creates a cache with the given configuration.
    #[must_use]
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            config,
            sequences: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the number of user sequences currently held, including
    /// expired sequences that have not been swept yet.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.sequences.read().len()
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }
}

impl Default for MemoryRecencyCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RecencyCache for MemoryRecencyCache {
    #[allow(clippy::significant_drop_tightening)]
    fn put(&self, record: &LogRecord) -> CacheResult<()> {
        let raw = serde_json::to_string(record)?;

        let now = Instant::now();
        let mut sequences = self.sequences.write();
        let sequence = sequences
            .entry(record.user_id.clone())
            .or_insert_with(|| UserSequence::new(now + self.config.ttl));

        // An expired sequence is semantically absent; start it over.
        if !sequence.is_live(now) {
            sequence.entries.clear();
        }

        sequence.entries.push_front(raw);
        while sequence.entries.len() > self.config.max_records_per_user {
            sequence.entries.pop_back();
        }

        // Every write gives the whole sequence a fresh lease.
        sequence.expires_at = now + self.config.ttl;

        Ok(())
    }

    fn page(&self, user_id: &str, offset: usize, limit: usize) -> CacheResult<CachedPage> {
        let now = Instant::now();
        let sequences = self.sequences.read();
        let Some(sequence) = sequences.get(user_id).filter(|s| s.is_live(now)) else {
            return Ok(CachedPage::empty());
        };

        let records = sequence
            .entries
            .iter()
            .skip(offset)
            .take(limit)
            .filter_map(|raw| decode_entry(raw))
            .collect();

        Ok(CachedPage {
            records,
            total: sequence.entries.len(),
        })
    }

    fn search(&self, user_id: &str, spec: &SearchSpec) -> CacheResult<Vec<LogRecord>> {
        let matcher = spec.compile()?;

        let now = Instant::now();
        let sequences = self.sequences.read();
        let Some(sequence) = sequences.get(user_id).filter(|s| s.is_live(now)) else {
            return Ok(Vec::new());
        };

        Ok(sequence
            .entries
            .iter()
            .filter_map(|raw| decode_entry(raw))
            .filter(|record| matcher.matches(record))
            .collect())
    }

    fn find(&self, user_id: &str, log_id: &str) -> CacheResult<Option<LogRecord>> {
        let now = Instant::now();
        let sequences = self.sequences.read();
        let Some(sequence) = sequences.get(user_id).filter(|s| s.is_live(now)) else {
            return Ok(None);
        };

        Ok(sequence
            .entries
            .iter()
            .filter_map(|raw| decode_entry(raw))
            .find(|record| record.log_id == log_id))
    }

    fn evict_expired(&self) -> usize {
        let now = Instant::now();
        let mut sequences = self.sequences.write();
        let before = sequences.len();
        sequences.retain(|_, sequence| sequence.is_live(now));
        before - sequences.len()
    }
}

/// Decodes a raw cache entry, skipping it on failure.
fn decode_entry(raw: &str) -> Option<LogRecord> {
    match serde_json::from_str(raw) {
        Ok(record) => Some(record),
        Err(e) => {
            debug!(error = %e, "skipping undecodable cache entry");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logbook_core::Level;
    use proptest::prelude::*;

    fn make_record(user_id: &str, message: &str) -> LogRecord {
        LogRecord::new(user_id, Level::info(), "auth-service", message)
    }

    fn page_of(cache: &MemoryRecencyCache, user_id: &str, offset: usize, limit: usize) -> CachedPage {
        match cache.page(user_id, offset, limit) {
            Ok(page) => page,
            Err(e) => panic!("page failed: {e}"),
        }
    }

    fn short_ttl(ttl_ms: u64) -> MemoryRecencyCache {
        MemoryRecencyCache::with_config(CacheConfig::new().with_ttl(Duration::from_millis(ttl_ms)))
    }

    // ===========================================
    // Ordering and Pagination Tests
    // ===========================================

    #[test]
    fn put_then_page_returns_newest_first() {
        let cache = MemoryRecencyCache::new();

        for message in ["first", "second", "third"] {
            let result = cache.put(&make_record("1", message));
            assert!(result.is_ok());
        }

        let page = page_of(&cache, "1", 0, 10);
        assert_eq!(page.total, 3);
        assert_eq!(page.records[0].message, "third");
        assert_eq!(page.records[1].message, "second");
        assert_eq!(page.records[2].message, "first");
    }

    #[test]
    fn page_slices_with_offset() {
        let cache = MemoryRecencyCache::new();

        for i in 0..7 {
            let _ = cache.put(&make_record("1", &format!("message {i}")));
        }

        // Newest first, so offset 3 skips messages 6, 5, 4.
        let page = page_of(&cache, "1", 3, 3);
        assert_eq!(page.total, 7);
        assert_eq!(page.records.len(), 3);
        assert_eq!(page.records[0].message, "message 3");
        assert_eq!(page.records[2].message, "message 1");
    }

    #[test]
    fn page_past_the_end_is_empty_but_keeps_total() {
        let cache = MemoryRecencyCache::new();

        for i in 0..3 {
            let _ = cache.put(&make_record("1", &format!("message {i}")));
        }

        let page = page_of(&cache, "1", 10, 5);
        assert!(page.records.is_empty());
        assert_eq!(page.total, 3);
    }

    #[test]
    fn page_for_unknown_user_is_empty() {
        let cache = MemoryRecencyCache::new();
        let page = page_of(&cache, "nobody", 0, 5);
        assert!(page.records.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn users_are_isolated() {
        let cache = MemoryRecencyCache::new();

        let _ = cache.put(&make_record("1", "for user one"));
        let _ = cache.put(&make_record("2", "for user two"));

        let page = page_of(&cache, "1", 0, 10);
        assert_eq!(page.total, 1);
        assert_eq!(page.records[0].message, "for user one");
    }

    // ===========================================
    // Cap Eviction Tests
    // ===========================================

    #[test]
    fn cap_evicts_oldest_records() {
        let cache = MemoryRecencyCache::with_config(
            CacheConfig::new().with_max_records_per_user(3),
        );

        for i in 0..5 {
            let _ = cache.put(&make_record("1", &format!("message {i}")));
        }

        let page = page_of(&cache, "1", 0, 10);
        assert_eq!(page.total, 3);
        assert_eq!(page.records[0].message, "message 4");
        assert_eq!(page.records[2].message, "message 2");
    }

    #[test]
    fn cap_applies_per_user() {
        let cache = MemoryRecencyCache::with_config(
            CacheConfig::new().with_max_records_per_user(2),
        );

        for i in 0..4 {
            let _ = cache.put(&make_record("1", &format!("one {i}")));
            let _ = cache.put(&make_record("2", &format!("two {i}")));
        }

        assert_eq!(page_of(&cache, "1", 0, 10).total, 2);
        assert_eq!(page_of(&cache, "2", 0, 10).total, 2);
    }

    #[test]
    fn config_defaults() {
        let config = CacheConfig::default();
        assert_eq!(config.max_records_per_user, DEFAULT_MAX_RECORDS_PER_USER);
        assert_eq!(config.ttl, Duration::from_secs(DEFAULT_TTL_SECS));
    }

    // ===========================================
    // TTL Tests
    // ===========================================

    #[test]
    fn expired_sequence_reads_as_empty() {
        let cache = short_ttl(25);

        let _ = cache.put(&make_record("1", "soon gone"));
        assert_eq!(page_of(&cache, "1", 0, 5).total, 1);

        std::thread::sleep(Duration::from_millis(80));

        let page = page_of(&cache, "1", 0, 5);
        assert!(page.records.is_empty());
        assert_eq!(page.total, 0);
        assert!(matches!(cache.find("1", "any"), Ok(None)));
        let found = cache.search("1", &SearchSpec::full_record("gone"));
        assert!(matches!(found.as_deref(), Ok([])));
    }

    #[test]
    fn writes_refresh_the_lease() {
        let cache = short_ttl(200);

        let _ = cache.put(&make_record("1", "older"));
        std::thread::sleep(Duration::from_millis(100));
        let _ = cache.put(&make_record("1", "newer"));
        std::thread::sleep(Duration::from_millis(100));

        // 200ms after the first write, but only 100ms after the second; the
        // second write renewed the whole sequence.
        let page = page_of(&cache, "1", 0, 5);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn put_to_expired_sequence_starts_fresh() {
        let cache = short_ttl(25);

        let _ = cache.put(&make_record("1", "stale"));
        std::thread::sleep(Duration::from_millis(80));
        let _ = cache.put(&make_record("1", "fresh"));

        let page = page_of(&cache, "1", 0, 5);
        assert_eq!(page.total, 1);
        assert_eq!(page.records[0].message, "fresh");
    }

    #[test]
    fn evict_expired_removes_only_dead_sequences() {
        let cache = short_ttl(25);

        let _ = cache.put(&make_record("1", "will expire"));
        std::thread::sleep(Duration::from_millis(80));
        let _ = cache.put(&make_record("2", "still live"));

        assert_eq!(cache.user_count(), 2);
        assert_eq!(cache.evict_expired(), 1);
        assert_eq!(cache.user_count(), 1);
        assert_eq!(page_of(&cache, "2", 0, 5).total, 1);
    }

    #[test]
    fn evict_expired_on_empty_cache_is_zero() {
        let cache = MemoryRecencyCache::new();
        assert_eq!(cache.evict_expired(), 0);
    }

    // ===========================================
    // Decode-Skip Tests
    // ===========================================

    #[test]
    fn undecodable_entries_are_skipped_but_counted() {
        let cache = MemoryRecencyCache::new();

        for message in ["a", "b", "c"] {
            let _ = cache.put(&make_record("1", message));
        }

        // Corrupt the second raw entry in place.
        {
            let mut sequences = cache.sequences.write();
            if let Some(sequence) = sequences.get_mut("1") {
                sequence.entries[1] = "{not json".to_string();
            }
        }

        let page = page_of(&cache, "1", 0, 3);
        assert_eq!(page.total, 3);
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.records[0].message, "c");
        assert_eq!(page.records[1].message, "a");
    }

    #[test]
    fn find_skips_undecodable_entries() {
        let cache = MemoryRecencyCache::new();

        let target = make_record("1", "target");
        let _ = cache.put(&target);
        let _ = cache.put(&make_record("1", "cover"));

        {
            let mut sequences = cache.sequences.write();
            if let Some(sequence) = sequences.get_mut("1") {
                sequence.entries.push_front("{not json".to_string());
            }
        }

        let found = cache.find("1", &target.log_id);
        assert!(matches!(found, Ok(Some(record)) if record.message == "target"));
    }

    // ===========================================
    // Search Tests
    // ===========================================

    #[test]
    fn search_full_record_filters_by_substring() {
        let cache = MemoryRecencyCache::new();

        let _ = cache.put(&make_record("1", "payment accepted"));
        let _ = cache.put(&make_record("1", "login failed"));

        let results = cache.search("1", &SearchSpec::full_record("payment"));
        assert!(results.is_ok());
        if let Ok(results) = results {
            assert_eq!(results.len(), 1);
            assert_eq!(results[0].message, "payment accepted");
        }
    }

    #[test]
    fn search_level_filters_by_level() {
        let cache = MemoryRecencyCache::new();

        let _ = cache.put(&LogRecord::new("1", Level::error(), "auth-service", "boom"));
        let _ = cache.put(&LogRecord::new("1", Level::info(), "auth-service", "fine"));

        let results = cache.search("1", &SearchSpec::level("err"));
        assert!(results.is_ok());
        if let Ok(results) = results {
            assert_eq!(results.len(), 1);
            assert_eq!(results[0].message, "boom");
        }
    }

    #[test]
    fn search_invalid_pattern_is_an_error() {
        let cache = MemoryRecencyCache::new();
        let _ = cache.put(&make_record("1", "anything"));

        let result = cache.search("1", &SearchSpec::level("[broken"));
        assert!(result.is_err());
    }

    #[test]
    fn search_unknown_user_is_empty() {
        let cache = MemoryRecencyCache::new();
        let results = cache.search("nobody", &SearchSpec::full_record("x"));
        assert!(matches!(results.as_deref(), Ok([])));
    }

    // ===========================================
    // Find Tests
    // ===========================================

    #[test]
    fn find_hits_and_misses() {
        let cache = MemoryRecencyCache::new();

        let record = make_record("1", "lookup me");
        let _ = cache.put(&record);

        let found = cache.find("1", &record.log_id);
        assert!(matches!(found, Ok(Some(r)) if r.log_id == record.log_id));

        assert!(matches!(cache.find("1", "absent-id"), Ok(None)));
        assert!(matches!(cache.find("2", &record.log_id), Ok(None)));
    }

    // ===========================================
    // Property Tests
    // ===========================================

    proptest! {
        #[test]
        fn cap_is_never_exceeded(cap in 1usize..20, count in 0usize..60) {
            let cache = MemoryRecencyCache::with_config(
                CacheConfig::new().with_max_records_per_user(cap),
            );

            for i in 0..count {
                let record = make_record("1", &format!("message {i}"));
                prop_assert!(cache.put(&record).is_ok());
            }

            let page = cache.page("1", 0, cap + 10);
            prop_assert!(page.is_ok());
            if let Ok(page) = page {
                prop_assert_eq!(page.total, count.min(cap));
            }
        }

        #[test]
        fn newest_records_survive_eviction(cap in 1usize..10, count in 1usize..30) {
            let cache = MemoryRecencyCache::with_config(
                CacheConfig::new().with_max_records_per_user(cap),
            );

            for i in 0..count {
                let _ = cache.put(&make_record("1", &format!("message {i}")));
            }

            let page = cache.page("1", 0, cap);
            prop_assert!(page.is_ok());
            if let Ok(page) = page {
                let kept = count.min(cap);
                for (slot, record) in page.records.iter().enumerate() {
                    let expected = count - 1 - slot;
                    prop_assert_eq!(record.message.clone(), format!("message {expected}"));
                }
                prop_assert_eq!(page.records.len(), kept);
            }
        }
    }
}
