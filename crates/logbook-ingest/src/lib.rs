//! # logbook-ingest
//!
//! Synthetic record generation and ingest pipeline for Logbook.
//!
//! This crate provides:
//!
//! - [`start_generator_task`] — Periodic synthesis of records into a queue
//! - [`start_pipeline_task`] — Draining the queue into durable storage
//! - [`GeneratorConfig`] / [`PipelineConfig`] — Cadence and seeding tuning
//!
//! The two tasks are joined by a bounded [`tokio::sync::mpsc`] channel.
//! When the consumer falls behind, newly generated records are dropped at
//! the queue boundary rather than buffered without bound.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use logbook_ingest::{
//!     start_generator_task, start_pipeline_task, GeneratorConfig, PipelineConfig,
//! };
//! use logbook_cache::{MemoryRecencyCache, RecencyCache};
//! use logbook_store::{DurableStore, MemoryStore};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (tx, rx) = tokio::sync::mpsc::channel(100);
//! let store: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());
//! let cache: Arc<dyn RecencyCache> = Arc::new(MemoryRecencyCache::new());
//!
//! let generator = start_generator_task(tx, GeneratorConfig::default());
//! let pipeline = start_pipeline_task(rx, store, cache, PipelineConfig::default());
//!
//! // ... serve traffic ...
//!
//! generator.stop();
//! pipeline.stop();
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod generator;
pub mod pipeline;

// Re-export main types
pub use generator::{start_generator_task, synthesize_record, GeneratorConfig, GeneratorHandle};
pub use pipeline::{start_pipeline_task, PipelineConfig, PipelineHandle};
