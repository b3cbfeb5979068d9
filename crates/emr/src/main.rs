//! Easy EMR server
//!
//! A small electronic medical records demo backend.

use std::sync::Arc;

use clap::Parser;
use easy_emr_persistence::backends::memory::MemoryStore;
use easy_emr_persistence::core::DocumentStore;
use easy_emr_rest::observability::{init_metrics, init_sentry};
use easy_emr_rest::{AppState, ServerConfig, create_app_with_state, init_logging};
use tracing::{info, warn};

#[cfg(feature = "json-file")]
use easy_emr_persistence::backends::json_file::JsonFileStore;

/// Starts the Axum HTTP server and runs until Ctrl-C.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Builds state around `store`, attaching the metrics handle if enabled.
fn build_state<S: DocumentStore + 'static>(
    store: S,
    config: ServerConfig,
) -> anyhow::Result<AppState<S>> {
    let enable_metrics = config.enable_metrics;
    let state = AppState::new(Arc::new(store), config);

    if enable_metrics {
        let handle = init_metrics()?;
        Ok(state.with_metrics(handle))
    } else {
        Ok(state)
    }
}

async fn start<S: DocumentStore + 'static>(store: S, config: ServerConfig) -> anyhow::Result<()> {
    let state = build_state(store, config.clone())?;
    let app = create_app_with_state(state);
    serve(app, &config).await
}

/// Starts the server on the JSON file store.
#[cfg(feature = "json-file")]
async fn start_json_file(config: ServerConfig) -> anyhow::Result<()> {
    info!(data_file = %config.data_file, "Opening JSON document store");
    let store = JsonFileStore::open(&config.data_file)?;
    start(store, config).await
}

/// Fallback when the json-file feature is not enabled.
#[cfg(not(feature = "json-file"))]
async fn start_json_file(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The JSON file store requires the 'json-file' feature. \
         Build with: cargo build -p easy-emr --features json-file, \
         or set EMR_DATA_FILE=:memory:"
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; a malformed one is not.
    match dotenvy::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e.into()),
    }

    let config = ServerConfig::parse();
    let sentry_guard = init_sentry(config.sentry_dsn.as_deref())?;
    init_logging(&config.log_level, config.log_format);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        data_file = %config.data_file,
        sentry = sentry_guard.is_some(),
        metrics = config.enable_metrics,
        "Starting Easy EMR server"
    );

    if config.uses_memory_store() {
        warn!("Using the in-memory store; records are lost on exit");
        start(MemoryStore::new(), config).await
    } else {
        start_json_file(config).await
    }
}
