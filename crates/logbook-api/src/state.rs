//! Shared state for the log API server.

use std::sync::Arc;
use std::time::Instant;

use logbook_cache::RecencyCache;
use logbook_store::DurableStore;

use crate::config::AppConfig;
use crate::reader::LogReader;

/// Shared state for the log API server.
///
/// Everything a request handler touches hangs off this value: the resolved
/// configuration, handles to both storage tiers, and the cache-aside reader
/// built over them. One instance is created at startup and shared behind an
/// [`Arc`] by every request task.
pub struct AppState {
    /// Service configuration.
    config: AppConfig,
    /// Recency cache tier.
    cache: Arc<dyn RecencyCache>,
    /// Durable store tier.
    store: Arc<dyn DurableStore>,
    /// Cache-aside read path over the two tiers.
    reader: LogReader,
    /// Server start time.
    start_time: Instant,
}

impl AppState {
    /// Create state over the given tiers.
    ///
    /// The reader inherits the configured search mode, so both tiers apply
    /// the same query semantics for the life of the process.
    pub fn new(
        config: AppConfig,
        cache: Arc<dyn RecencyCache>,
        store: Arc<dyn DurableStore>,
    ) -> Self {
        let reader = LogReader::new(Arc::clone(&cache), Arc::clone(&store), config.search.mode);
        Self {
            config,
            cache,
            store,
            reader,
            start_time: Instant::now(),
        }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the cache-aside reader.
    #[must_use]
    pub const fn reader(&self) -> &LogReader {
        &self.reader
    }

    /// Get a handle to the recency cache tier.
    #[must_use]
    pub fn cache(&self) -> Arc<dyn RecencyCache> {
        Arc::clone(&self.cache)
    }

    /// Get a handle to the durable store tier.
    #[must_use]
    pub fn store(&self) -> Arc<dyn DurableStore> {
        Arc::clone(&self.store)
    }

    /// Reads answered by the cache since startup.
    #[must_use]
    pub fn cache_hits(&self) -> u64 {
        self.reader.cache_hits()
    }

    /// Reads that fell through to the store since startup.
    #[must_use]
    pub fn cache_misses(&self) -> u64 {
        self.reader.cache_misses()
    }

    /// Get server uptime in seconds.
    #[must_use]
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
