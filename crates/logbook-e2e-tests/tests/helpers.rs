//! Test helpers for E2E tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use logbook_api::{AppConfig, AppState, LogService};
use logbook_cache::{start_sweep_task, SweepConfig, SweepHandle};
use logbook_core::{Level, LogRecord};
use logbook_ingest::{
    start_generator_task, start_pipeline_task, GeneratorConfig, GeneratorHandle, PipelineConfig,
    PipelineHandle,
};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Default test timeout.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Initialize test logging. Repeat calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Find an available port for testing.
pub async fn find_available_port() -> u16 {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

/// A user id no other test writes to.
pub fn unique_user() -> String {
    format!("user-{}", Uuid::new_v4().simple())
}

/// A record timestamped `secs_ago` seconds in the past, so ordering across
/// several records is deterministic.
pub fn aged_record(user_id: &str, message: &str, secs_ago: i64) -> LogRecord {
    LogRecord::new(user_id, Level::info(), "auth-service", message)
        .with_timestamp(Utc::now() - chrono::Duration::seconds(secs_ago))
}

/// Test service that manages its own lifecycle.
///
/// Runs the same background tasks the daemon runs: the cache sweep always,
/// and the synthetic ingest pair when the configuration enables it.
pub struct TestService {
    pub addr: SocketAddr,
    pub state: Arc<AppState>,
    sweep: SweepHandle,
    ingest: Option<(GeneratorHandle, PipelineHandle)>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestService {
    /// Start a service with synthetic ingest disabled, on an available port.
    pub async fn start() -> Self {
        let mut config = AppConfig::default();
        config.ingest.enabled = false;
        Self::start_with_config(config).await
    }

    /// Start a service with the given configuration.
    pub async fn start_with_config(config: AppConfig) -> Self {
        init_tracing();

        let port = find_available_port().await;
        let addr: SocketAddr = format!("127.0.0.1:{port}").parse().unwrap();

        let service = LogService::from_config(config.clone()).unwrap();
        let state = service.state();

        let sweep = start_sweep_task(
            state.cache(),
            SweepConfig {
                interval: config.sweep_interval(),
            },
        );

        let ingest = if config.ingest.enabled {
            let (tx, rx) = mpsc::channel(config.ingest.channel_capacity);
            let generator = start_generator_task(
                tx,
                GeneratorConfig {
                    interval: config.generator_interval(),
                },
            );
            let pipeline = start_pipeline_task(
                rx,
                state.store(),
                state.cache(),
                PipelineConfig {
                    seed_cache: config.ingest.seed_cache,
                },
            );
            Some((generator, pipeline))
        } else {
            None
        };

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let handle = tokio::spawn(async move {
            if let Err(e) = service
                .serve_with_shutdown(addr, async move {
                    let _ = shutdown_rx.await;
                })
                .await
            {
                eprintln!("Server error: {e}");
            }
        });

        // Wait for the server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        Self {
            addr,
            state,
            sweep,
            ingest,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    /// Full URL for a path on this service.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Records the ingest pipeline has persisted so far.
    pub fn ingest_stored(&self) -> u64 {
        self.ingest.as_ref().map_or(0, |(_, pipeline)| pipeline.stored())
    }

    /// Shutdown the service and its background tasks.
    pub async fn shutdown(mut self) {
        if let Some((generator, pipeline)) = self.ingest.take() {
            generator.stop();
            pipeline.stop();
        }
        self.sweep.stop();

        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = timeout(Duration::from_secs(2), handle).await;
        }
    }
}

/// GET a URL and decode the JSON body.
///
/// Returns the status and the body; bodies that fail to decode come back
/// as `Null` so status-only assertions stay simple.
pub async fn get_json(url: &str) -> (reqwest::StatusCode, serde_json::Value) {
    let response = timeout(TEST_TIMEOUT, reqwest::get(url))
        .await
        .expect("request timed out")
        .expect("request failed");
    let status = response.status();
    let json = response.json().await.unwrap_or(serde_json::Value::Null);
    (status, json)
}
