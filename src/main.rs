use neoservice::config::Config;
use neoservice::infrastructure::persistence::open_store;
use neoservice::interface::api::{build_router, init_metrics, AppState};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting NEOSERVICE backend");

    // Load configuration
    let config = Config::load()?;
    info!(
        "Configuration loaded: server {}, store backend {:?}",
        config.server.bind_address(),
        config.store.backend
    );

    // Initialize metrics exporter
    info!("Initializing Prometheus metrics exporter");
    let prometheus_handle = init_metrics()?;

    // Initialize the document store; a missing store degrades rather than aborts
    let store = open_store(&config.store).await;
    if store.is_none() {
        warn!("Document store unavailable; call endpoints will fail until it is configured");
    }

    let state = AppState::new(store.clone(), &config.store.database);
    let app = build_router(state, prometheus_handle);

    let listener = tokio::net::TcpListener::bind(config.server.bind_address()).await?;
    info!("REST API server listening on {}", config.server.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down...");
    if let Some(store) = store {
        store.close().await;
        info!("Document store closed");
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
