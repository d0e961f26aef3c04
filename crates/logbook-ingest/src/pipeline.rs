//! Ingest pipeline from the generated-record queue into storage.
//!
//! The pipeline drains the queue and persists each record to the durable
//! store. Persistence failures are logged and the record is dropped;
//! generation never stalls on a failing store. Optionally the pipeline
//! also seeds the recency cache with each stored record, which warms
//! reads at the cost of making cache state diverge from read traffic.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::sync::mpsc;
use tracing::{debug, warn};

use logbook_cache::RecencyCache;
use logbook_core::LogRecord;
use logbook_store::DurableStore;

/// Configuration for the pipeline task.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Whether stored records are also written into the recency cache.
    pub seed_cache: bool,
}

/// Handle for controlling the pipeline task.
#[derive(Debug)]
pub struct PipelineHandle {
    running: Arc<AtomicBool>,
    stored: Arc<AtomicU64>,
}

impl PipelineHandle {
    /// Create a new pipeline handle.
    pub(crate) fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            stored: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Check if the pipeline task is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Get the number of records persisted so far.
    #[must_use]
    pub fn stored(&self) -> u64 {
        self.stored.load(Ordering::SeqCst)
    }

    /// Stop the pipeline task.
    ///
    /// Takes effect once the current queue read completes; closing the
    /// queue's send side ends the task immediately.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

/// Start a task that persists queued records.
///
/// Returns a handle to control the task and monitor its state.
pub fn start_pipeline_task(
    mut rx: mpsc::Receiver<LogRecord>,
    store: Arc<dyn DurableStore>,
    cache: Arc<dyn RecencyCache>,
    config: PipelineConfig,
) -> PipelineHandle {
    let handle = PipelineHandle::new();
    handle.running.store(true, Ordering::SeqCst);

    let running = Arc::clone(&handle.running);
    let stored = Arc::clone(&handle.stored);

    tokio::spawn(async move {
        while running.load(Ordering::SeqCst) {
            let Some(record) = rx.recv().await else {
                // Queue closed, stop the task
                running.store(false, Ordering::SeqCst);
                break;
            };

            if let Err(e) = store.save(&record) {
                warn!(error = %e, log_id = %record.log_id, "dropping record, store rejected it");
                continue;
            }
            stored.fetch_add(1, Ordering::SeqCst);

            // Cache seeding is advisory; the stored record is the source of truth.
            if config.seed_cache {
                if let Err(e) = cache.put(&record) {
                    debug!(error = %e, log_id = %record.log_id, "cache seeding failed");
                }
            }
        }
    });

    handle
}
