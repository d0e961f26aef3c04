//! # logbook-store
//!
//! Durable log record storage backends for Logbook.
//!
//! This crate provides:
//!
//! - [`DurableStore`] — Abstract trait for persistence backends
//! - [`MemoryStore`] — In-memory append-only storage
//! - [`FileStore`] — JSON-lines storage on disk
//!
//! The store is the system of record behind the recency cache: it keeps
//! every saved record, with no cap and no expiry, and serves reads the
//! cache cannot.
//!
//! ## Example
//!
//! ```rust
//! use logbook_core::{Level, LogRecord};
//! use logbook_store::{DurableStore, MemoryStore};
//!
//! # fn main() -> logbook_store::StoreResult<()> {
//! let store = MemoryStore::new();
//! store.save(&LogRecord::new("1", Level::info(), "auth-service", "login ok"))?;
//!
//! let records = store.fetch_by_user("1", 5)?;
//! assert_eq!(records.len(), 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod file_store;
pub mod memory;
pub mod traits;

// Re-export main types
pub use error::{StoreError, StoreResult};
pub use file_store::FileStore;
pub use memory::MemoryStore;
pub use traits::DurableStore;
