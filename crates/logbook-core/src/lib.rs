//! # logbook-core
//!
//! Core types shared by every Logbook tier.
//!
//! This crate provides:
//!
//! - [`LogRecord`] — Immutable per-user log record
//! - [`Level`] — Free-form severity tag with well-known constructors
//! - [`SearchSpec`] — Declarative search semantics consumed by cache and store
//! - [`PageParams`] — Lenient pagination with compatibility defaults
//!
//! ## Example
//!
//! ```rust
//! use logbook_core::{Level, LogRecord, PageParams, SearchSpec};
//!
//! # fn main() -> Result<(), logbook_core::SearchError> {
//! let record = LogRecord::new("42", Level::info(), "auth-service", "User logged in");
//! assert_eq!(record.user_id, "42");
//!
//! let params = PageParams::from_raw(Some("2"), Some("10"));
//! assert_eq!(params.offset(), 10);
//!
//! let matcher = SearchSpec::full_record("logged").compile()?;
//! assert!(matcher.matches(&record));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod page;
pub mod record;
pub mod search;

// Re-export main types
pub use page::{PageParams, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use record::{Level, LogRecord};
pub use search::{SearchError, SearchMatcher, SearchMode, SearchSpec};
