//! Service configuration.
//!
//! Configuration for the logbook service, including:
//! - HTTP bind address
//! - Recency cache sizing and expiry
//! - Durable store backend selection
//! - Synthetic ingest cadence
//! - Search interpretation

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use logbook_cache::{DEFAULT_MAX_RECORDS_PER_USER, DEFAULT_TTL_SECS};
use logbook_core::SearchMode;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerSettings {
    /// Address to bind the HTTP server to.
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Recency cache settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheSettings {
    /// Maximum records retained per user; the oldest are evicted beyond this.
    pub max_records_per_user: usize,
    /// Seconds a user's cached sequence lives after its most recent write.
    pub ttl_secs: u64,
    /// Seconds between background sweeps for expired sequences.
    pub sweep_interval_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_records_per_user: DEFAULT_MAX_RECORDS_PER_USER,
            ttl_secs: DEFAULT_TTL_SECS,
            sweep_interval_secs: 30,
        }
    }
}

/// Durable store backend selection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Keep records in process memory; contents are lost on restart.
    #[default]
    Memory,
    /// Append records to a JSON Lines file at `store.path`.
    File,
}

/// Durable store settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreSettings {
    /// Backend records are persisted in.
    pub backend: StoreBackend,
    /// File path for the `file` backend.
    pub path: Option<PathBuf>,
}

/// Synthetic ingest settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngestSettings {
    /// Whether to run the synthetic generator.
    pub enabled: bool,
    /// Milliseconds between generated records.
    pub interval_ms: u64,
    /// Capacity of the generator-to-pipeline queue.
    pub channel_capacity: usize,
    /// Whether stored records also seed the recency cache.
    pub seed_cache: bool,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: 10_000,
            channel_capacity: 100,
            seed_cache: false,
        }
    }
}

/// Search settings.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchSettings {
    /// How search queries are interpreted by both tiers.
    pub mode: SearchMode,
}

/// Main service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSettings,
    /// Recency cache settings.
    #[serde(default)]
    pub cache: CacheSettings,
    /// Durable store settings.
    #[serde(default)]
    pub store: StoreSettings,
    /// Synthetic ingest settings.
    #[serde(default)]
    pub ingest: IngestSettings,
    /// Search settings.
    #[serde(default)]
    pub search: SearchSettings,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> ApiResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ApiError::Config(format!(
                "failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(content: &str) -> ApiResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ApiError::Config(format!("invalid TOML: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> ApiResult<()> {
        self.bind_addr()?;

        if self.cache.max_records_per_user == 0 {
            return Err(ApiError::Config(
                "cache.max_records_per_user must be greater than 0".to_string(),
            ));
        }

        if self.cache.ttl_secs == 0 {
            return Err(ApiError::Config(
                "cache.ttl_secs must be greater than 0".to_string(),
            ));
        }

        if self.cache.sweep_interval_secs == 0 {
            return Err(ApiError::Config(
                "cache.sweep_interval_secs must be greater than 0".to_string(),
            ));
        }

        if self.store.backend == StoreBackend::File && self.store.path.is_none() {
            return Err(ApiError::Config(
                "store.path is required for the file backend".to_string(),
            ));
        }

        if self.ingest.interval_ms == 0 {
            return Err(ApiError::Config(
                "ingest.interval_ms must be greater than 0".to_string(),
            ));
        }

        if self.ingest.channel_capacity == 0 {
            return Err(ApiError::Config(
                "ingest.channel_capacity must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// The parsed bind address.
    ///
    /// # Errors
    ///
    /// Returns an error if `server.bind_addr` is not a valid socket address.
    pub fn bind_addr(&self) -> ApiResult<SocketAddr> {
        self.server.bind_addr.parse().map_err(|_| {
            ApiError::Config(format!(
                "invalid bind address '{}'",
                self.server.bind_addr
            ))
        })
    }

    /// Cache TTL as a duration.
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_secs)
    }

    /// Sweep interval as a duration.
    #[must_use]
    pub const fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.cache.sweep_interval_secs)
    }

    /// Generator interval as a duration.
    #[must_use]
    pub const fn generator_interval(&self) -> Duration {
        Duration::from_millis(self.ingest.interval_ms)
    }
}
