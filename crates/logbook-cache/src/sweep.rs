//! Periodic eviction of expired cache sequences.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::debug;

use crate::traits::RecencyCache;

/// Configuration for the sweep task.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Interval between sweeps.
    pub interval: Duration,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
        }
    }
}

/// Handle for controlling the sweep task.
#[derive(Debug)]
pub struct SweepHandle {
    running: Arc<AtomicBool>,
}

impl SweepHandle {
    /// Create a new sweep handle.
    pub(crate) fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Check if the sweep task is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the sweep task.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

/// Start a periodic task that drops expired user sequences.
///
/// Reads already treat expired sequences as absent, so the sweep only
/// reclaims memory. Returns a handle to control the task.
pub fn start_sweep_task(cache: Arc<dyn RecencyCache>, config: SweepConfig) -> SweepHandle {
    let handle = SweepHandle::new();
    handle.running.store(true, Ordering::SeqCst);

    let running = Arc::clone(&handle.running);

    tokio::spawn(async move {
        let mut interval_timer = tokio::time::interval(config.interval);

        while running.load(Ordering::SeqCst) {
            interval_timer.tick().await;

            if !running.load(Ordering::SeqCst) {
                break;
            }

            let evicted = cache.evict_expired();
            if evicted > 0 {
                debug!(evicted, "dropped expired cache sequences");
            }
        }
    });

    handle
}
