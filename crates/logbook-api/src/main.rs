//! Logbook service binary.
//!
//! Serves the per-user log read API and runs the background sweep and
//! synthetic ingest tasks alongside it.

use logbook_api::{AppConfig, LogService};
use logbook_cache::{start_sweep_task, SweepConfig};
use logbook_ingest::{
    start_generator_task, start_pipeline_task, GeneratorConfig, PipelineConfig,
};
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse command line args: an optional config file path
    let args: Vec<String> = std::env::args().collect();

    let config = match args.get(1) {
        Some(path) => match AppConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load config from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => AppConfig::default(),
    };

    let addr = match config.bind_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Invalid bind address: {}", e);
            std::process::exit(1);
        }
    };

    info!("Starting logbook service on {}", addr);
    info!("  Logs:   http://{}/{{userId}}/logs", addr);
    info!("  Search: http://{}/{{userId}}/logs/search?q=...", addr);
    info!("  Lookup: http://{}/{{userId}}/{{logId}}", addr);

    let service = match LogService::from_config(config.clone()) {
        Ok(service) => service,
        Err(e) => {
            error!("Failed to build service: {}", e);
            std::process::exit(1);
        }
    };
    let state = service.state();

    // Background sweep reclaims expired cache sequences.
    let sweep = start_sweep_task(
        state.cache(),
        SweepConfig {
            interval: config.sweep_interval(),
        },
    );

    // Synthetic ingest: the generator feeds the pipeline over a bounded
    // queue, and the pipeline persists into the same tiers the API reads.
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
        info!("Synthetic ingest disabled");
        None
    };

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Shutdown signal received");
    };

    if let Err(e) = service.serve_with_shutdown(addr, shutdown).await {
        error!("Service error: {}", e);
        std::process::exit(1);
    }

    sweep.stop();
    if let Some((generator, pipeline)) = ingest {
        generator.stop();
        pipeline.stop();
        info!(
            emitted = generator.emitted(),
            stored = pipeline.stored(),
            "Ingest stopped"
        );
    }
}
