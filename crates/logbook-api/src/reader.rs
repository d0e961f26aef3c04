//! Cache-aside read path.
//!
//! Every read consults the recency cache first and falls through to the
//! durable store when the cache cannot answer. An empty cache result and a
//! cache error are both treated as misses: the cache can only serve a read
//! it can prove it has data for. Records served from the store are copied
//! back into the cache in the background so the next read for the same
//! user can hit.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use logbook_cache::{CacheError, RecencyCache};
use logbook_core::{LogRecord, PageParams, SearchMode, SearchSpec};
use logbook_store::DurableStore;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};

/// One page of a user's logs, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedLogs {
    /// Records on the page.
    pub records: Vec<LogRecord>,
    /// Sequence length the page was computed against.
    pub total: usize,
    /// Page number that was served.
    pub page: usize,
    /// Page size that was applied.
    pub limit: usize,
    /// Whether another page follows this one.
    pub next_page: bool,
}

/// Cache-aside orchestrator over the two storage tiers.
///
/// The reader owns tier selection for the three read shapes (paged list,
/// search, single record) and counts hits and misses so the serving tier
/// is observable outside the logs.
pub struct LogReader {
    cache: Arc<dyn RecencyCache>,
    store: Arc<dyn DurableStore>,
    search_mode: SearchMode,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
}

impl LogReader {
    /// Create a reader over the given cache and store.
    pub fn new(
        cache: Arc<dyn RecencyCache>,
        store: Arc<dyn DurableStore>,
        search_mode: SearchMode,
    ) -> Self {
        Self {
            cache,
            store,
            search_mode,
            cache_hits: AtomicU64::new(0),
            cache_misses: AtomicU64::new(0),
        }
    }

    /// Reads answered by the cache so far.
    #[must_use]
    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }

    /// Reads that fell through to the store so far.
    #[must_use]
    pub fn cache_misses(&self) -> u64 {
        self.cache_misses.load(Ordering::Relaxed)
    }

    /// Fetch one page of a user's logs.
    ///
    /// Pagination metadata is exact only on the cache path. On the store
    /// path the response holds the first `limit` records, `total` is just
    /// the number returned, and `next_page` is always `false`: the store
    /// is never asked for a true per-user count.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails while serving a cache miss.
    pub fn paged_logs(&self, user_id: &str, params: PageParams) -> ApiResult<PagedLogs> {
        match self.cache.page(user_id, params.offset(), params.limit) {
            Ok(page) if !page.records.is_empty() => {
                self.record_hit(user_id, "page");
                return Ok(PagedLogs {
                    total: page.total,
                    next_page: params.has_next(page.total),
                    records: page.records,
                    page: params.page,
                    limit: params.limit,
                });
            }
            Ok(_) => self.record_miss(user_id, "page"),
            Err(e) => {
                warn!(user_id, error = %e, "cache page read failed");
                self.record_miss(user_id, "page");
            }
        }

        let records = self.store.fetch_by_user(user_id, params.limit)?;
        self.backfill(records.clone());

        Ok(PagedLogs {
            total: records.len(),
            next_page: false,
            records,
            page: params.page,
            limit: params.limit,
        })
    }

    /// Fetch every log of a user matching `query`.
    ///
    /// The query is interpreted per the configured [`SearchMode`], and both
    /// tiers apply the same interpretation.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or rejects the pattern while
    /// serving a cache miss.
    pub fn search(&self, user_id: &str, query: &str) -> ApiResult<Vec<LogRecord>> {
        let spec = SearchSpec::new(query, self.search_mode);

        match self.cache.search(user_id, &spec) {
            Ok(records) if !records.is_empty() => {
                self.record_hit(user_id, "search");
                return Ok(records);
            }
            Ok(_) => self.record_miss(user_id, "search"),
            Err(e) => {
                warn!(user_id, error = %e, "cache search failed");
                self.record_miss(user_id, "search");
            }
        }

        let records = self.store.search(user_id, &spec)?;
        self.backfill(records.clone());
        Ok(records)
    }

    /// Fetch a single log record by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when no record with `log_id` exists
    /// for `user_id`, or a store error if the fallback lookup fails.
    pub fn find(&self, user_id: &str, log_id: &str) -> ApiResult<LogRecord> {
        match self.cache.find(user_id, log_id) {
            Ok(Some(record)) => {
                self.record_hit(user_id, "find");
                return Ok(record);
            }
            Ok(None) => self.record_miss(user_id, "find"),
            Err(e) => {
                warn!(user_id, error = %e, "cache lookup failed");
                self.record_miss(user_id, "find");
            }
        }

        let Some(record) = self.store.fetch_by_id(user_id, log_id)? else {
            return Err(ApiError::NotFound("log".to_string(), log_id.to_string()));
        };
        self.backfill(vec![record.clone()]);
        Ok(record)
    }

    fn record_hit(&self, user_id: &str, operation: &'static str) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
        debug!(user_id, operation, "cache hit");
    }

    fn record_miss(&self, user_id: &str, operation: &'static str) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
        debug!(user_id, operation, "cache miss");
    }

    /// Queue a backfill of store results into the cache.
    ///
    /// Inserts oldest first so the newest record lands at the head of the
    /// rebuilt sequence.
    fn backfill(&self, records: Vec<LogRecord>) {
        if records.is_empty() {
            return;
        }

        let cache = self.cache.clone();
        spawn_best_effort("cache backfill", async move {
            for record in records.iter().rev() {
                cache.put(record)?;
            }
            Ok::<(), CacheError>(())
        });
    }
}

/// Spawn a detached task whose failure is only worth a log line.
///
/// The task's error is never propagated anywhere; it is recorded at warn
/// level under `task` and dropped.
pub fn spawn_best_effort<F, E>(task: &'static str, future: F)
where
    F: std::future::Future<Output = Result<(), E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = future.await {
            warn!(task, error = %e, "best-effort task failed");
        }
    });
}
