//! Synthetic record generation.
//!
//! The generator stands in for real application traffic: on a fixed
//! cadence it synthesizes a record for a random user from small fixed
//! pools and offers it to the ingest queue. When the queue is full the
//! record is dropped, so a stalled consumer can never back up generation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use rand::Rng;
use tokio::sync::mpsc;
use tracing::warn;

use logbook_core::{Level, LogRecord};

/// Severity pool records are drawn from.
const LEVELS: [&str; 3] = ["INFO", "WARN", "ERROR"];

/// Component pool records are drawn from.
const COMPONENTS: [&str; 4] = [
    "auth-service",
    "payment-service",
    "user-service",
    "inventory-service",
];

/// Message pool records are drawn from.
const MESSAGES: [&str; 5] = [
    "User login successful",
    "Payment processed",
    "Session token refreshed",
    "Inventory level low",
    "Database connection timeout",
];

/// User pool records are attributed to.
const USERS: [&str; 3] = ["1", "2", "3"];

/// Configuration for the generator task.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Interval between generated records.
    pub interval: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
        }
    }
}

/// Handle for controlling the generator task.
#[derive(Debug)]
pub struct GeneratorHandle {
    running: Arc<AtomicBool>,
    emitted: Arc<AtomicU64>,
}

impl GeneratorHandle {
    /// Create a new generator handle.
    pub(crate) fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            emitted: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Check if the generator task is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Get the number of records handed to the queue so far.
    #[must_use]
    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::SeqCst)
    }

    /// Stop the generator task.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

/// Synthesizes one record from the fixed pools.
#[must_use]
pub fn synthesize_record() -> LogRecord {
    let mut rng = rand::thread_rng();
    LogRecord::new(
        USERS[rng.gen_range(0..USERS.len())],
        Level::new(LEVELS[rng.gen_range(0..LEVELS.len())]),
        COMPONENTS[rng.gen_range(0..COMPONENTS.len())],
        MESSAGES[rng.gen_range(0..MESSAGES.len())],
    )
}

/// Start a periodic task that feeds synthesized records into the queue.
///
/// Returns a handle to control the task and monitor its state.
pub fn start_generator_task(
    tx: mpsc::Sender<LogRecord>,
    config: GeneratorConfig,
) -> GeneratorHandle {
    let handle = GeneratorHandle::new();
    handle.running.store(true, Ordering::SeqCst);

    let running = Arc::clone(&handle.running);
    let emitted = Arc::clone(&handle.emitted);

    tokio::spawn(async move {
        let mut interval_timer = tokio::time::interval(config.interval);

        while running.load(Ordering::SeqCst) {
            interval_timer.tick().await;

            if !running.load(Ordering::SeqCst) {
                break;
            }

            let record = synthesize_record();
            match tx.try_send(record) {
                Ok(()) => {
                    emitted.fetch_add(1, Ordering::SeqCst);
                }
                Err(mpsc::error::TrySendError::Full(record)) => {
                    warn!(log_id = %record.log_id, "ingest queue full, dropping record");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    // Consumer gone, stop the task
                    running.store(false, Ordering::SeqCst);
                    break;
                }
            }
        }
    });

    handle
}
