//! # logbook-api
//!
//! HTTP read API for per-user logs, backed by a recency cache over a
//! durable store.
//!
//! This crate wires the storage tiers together behind three read routes,
//! built on top of the axum HTTP framework.
//!
//! ## Features
//!
//! - **Cache-aside reads**: Every request tries the recency cache first and
//!   falls back to the durable store on a miss
//! - **Backfill**: Store results repopulate the cache off the request path
//! - **Lenient paging**: Malformed `page`/`limit` values fall back to
//!   defaults instead of rejecting the request
//! - **Configurable tiers**: Cache sizing, store backend, and ingest cadence
//!   come from one TOML file
//!
//! ## Example
//!
//! ```rust,no_run
//! use logbook_api::{AppConfig, LogService};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let addr = config.bind_addr().unwrap();
//!
//!     let service = LogService::from_config(config).unwrap();
//!     service.serve(addr).await.unwrap();
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/{userId}/logs` | GET | Paged logs for a user, newest first |
//! | `/{userId}/logs/search` | GET | Logs for a user matching `q` |
//! | `/{userId}/{logId}` | GET | A single log by id |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod reader;
pub mod routes;
pub mod server;
pub mod state;

// Re-export main types
pub use config::{AppConfig, StoreBackend};
pub use error::{ApiError, ApiResult};
pub use reader::{LogReader, PagedLogs};
pub use server::LogService;
pub use state::AppState;
