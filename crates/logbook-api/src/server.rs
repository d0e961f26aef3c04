//! Log service server implementation.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use logbook_cache::{CacheConfig, MemoryRecencyCache, RecencyCache};
use logbook_store::{DurableStore, FileStore, MemoryStore};

use crate::config::{AppConfig, StoreBackend};
use crate::error::{ApiError, ApiResult};
use crate::routes::create_router;
use crate::state::AppState;

/// HTTP server for the per-user log API.
///
/// Owns the shared state (cache, store, reader) and exposes the three read
/// routes over it. Ingest and sweep tasks run outside the server and reach
/// the tiers through [`LogService::state`].
#[derive(Clone)]
pub struct LogService {
    state: Arc<AppState>,
}

impl LogService {
    /// Create a service over existing cache and store handles.
    #[must_use]
    pub fn new(
        config: AppConfig,
        cache: Arc<dyn RecencyCache>,
        store: Arc<dyn DurableStore>,
    ) -> Self {
        let state = Arc::new(AppState::new(config, cache, store));
        Self { state }
    }

    /// Create a service with tiers built from the configuration.
    ///
    /// The cache is always in-memory; the store backend follows
    /// `store.backend`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file backend is selected without a path, or
    /// if opening the store file fails.
    pub fn from_config(config: AppConfig) -> ApiResult<Self> {
        let cache_config = CacheConfig::new()
            .with_max_records_per_user(config.cache.max_records_per_user)
            .with_ttl(config.cache_ttl());
        let cache: Arc<dyn RecencyCache> =
            Arc::new(MemoryRecencyCache::with_config(cache_config));

        let store: Arc<dyn DurableStore> = match config.store.backend {
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
            StoreBackend::File => {
                let path = config.store.path.clone().ok_or_else(|| {
                    ApiError::Config("store.path is required for the file backend".to_string())
                })?;
                Arc::new(FileStore::new(path)?)
            }
        };

        Ok(Self::new(config, cache, store))
    }

    /// Get the shared state for external access.
    #[must_use]
    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    /// Create the router without starting the server.
    ///
    /// Useful for testing or embedding in another server.
    #[must_use]
    pub fn router(&self) -> axum::Router {
        create_router(self.state.clone())
    }

    /// Start the server and listen for connections.
    ///
    /// This method runs until the server encounters a fatal error.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve(&self, addr: SocketAddr) -> ApiResult<()> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::BindFailed(addr, e))?;

        info!(addr = %addr, "Log service listening");

        let router = create_router(self.state.clone());

        axum::serve(listener, router)
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok(())
    }

    /// Start the server with graceful shutdown support.
    ///
    /// The server shuts down when the provided future completes.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve_with_shutdown<F>(&self, addr: SocketAddr, shutdown: F) -> ApiResult<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::BindFailed(addr, e))?;

        info!(addr = %addr, "Log service listening");

        let router = create_router(self.state.clone());

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        info!("Log service shut down");
        Ok(())
    }
}
