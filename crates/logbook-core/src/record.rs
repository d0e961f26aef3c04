//! Log record model.
//!
//! This module provides:
//! - [`LogRecord`] — Immutable per-user log record shared by cache and store
//! - [`Level`] — Free-form severity tag with well-known constructors
//!
//! Records serialize with the wire field names (`logid`, `userid`, ...) used
//! by every tier, so a record encoded by one tier decodes in any other.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity tag carried by a log record.
///
/// Well-known values are `INFO`, `WARN`, and `ERROR`, but levels are plain
/// strings on the wire and unknown values round-trip untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Level(String);

impl Level {
    /// Creates a level from an arbitrary string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The `INFO` level.
    #[must_use]
    pub fn info() -> Self {
        Self::new("INFO")
    }

    /// The `WARN` level.
    #[must_use]
    pub fn warn() -> Self {
        Self::new("WARN")
    }

    /// The `ERROR` level.
    #[must_use]
    pub fn error() -> Self {
        Self::new("ERROR")
    }

    /// Returns the string representation of this level.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Level {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Level {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// An immutable log record scoped to a single user.
///
/// Records are fully populated at construction and never mutated afterwards.
/// The durable store holds the authoritative copy; the recency cache holds a
/// serialized projection of the same value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Identifier unique within the owning user's records.
    #[serde(rename = "logid")]
    pub log_id: String,
    /// When the record was created.
    pub timestamp: DateTime<Utc>,
    /// Severity tag.
    pub level: Level,
    /// Component that emitted the record.
    pub component: String,
    /// The log message.
    pub message: String,
    /// Owning user.
    #[serde(rename = "userid")]
    pub user_id: String,
}

impl LogRecord {
    /// Creates a record with a fresh UUID id and the current timestamp.
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        level: Level,
        component: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            log_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            level,
            component: component.into(),
            message: message.into(),
            user_id: user_id.into(),
        }
    }

    /// Replaces the generated id.
    #[must_use]
    pub fn with_log_id(mut self, log_id: impl Into<String>) -> Self {
        self.log_id = log_id.into();
        self
    }

    /// Replaces the generated timestamp.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
