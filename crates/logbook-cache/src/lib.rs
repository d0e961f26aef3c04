//! # logbook-cache
//!
//! Bounded per-user recency cache for Logbook.
//!
//! This crate provides:
//!
//! - [`RecencyCache`] — Abstract trait for cache backends
//! - [`MemoryRecencyCache`] — In-memory sequences with per-user caps and TTL
//! - [`CachedPage`] — A slice of a cached sequence plus its full length
//! - [`CacheConfig`] — Cap and TTL tuning
//! - [`start_sweep_task`] — Periodic reclamation of expired sequences
//!
//! ## Example
//!
//! ```rust
//! use logbook_cache::{MemoryRecencyCache, RecencyCache};
//! use logbook_core::{Level, LogRecord};
//!
//! # fn main() -> logbook_cache::CacheResult<()> {
//! let cache = MemoryRecencyCache::new();
//! cache.put(&LogRecord::new("1", Level::info(), "auth-service", "login ok"))?;
//!
//! let page = cache.page("1", 0, 5)?;
//! assert_eq!(page.total, 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod memory;
pub mod sweep;
pub mod traits;

// Re-export main types
pub use error::{CacheError, CacheResult};
pub use memory::{
    CacheConfig, MemoryRecencyCache, DEFAULT_MAX_RECORDS_PER_USER, DEFAULT_TTL_SECS,
};
pub use sweep::{start_sweep_task, SweepConfig, SweepHandle};
pub use traits::{CachedPage, RecencyCache};
