//! End-to-end integration tests for the logbook service.
//!
//! These tests exercise the full stack:
//! - HTTP server startup and shutdown
//! - Paged, searched, and single-record reads over real sockets
//! - Cache-aside fallback, backfill, and expiry
//! - Synthetic ingest feeding the tiers the API reads

#![cfg(test)]
