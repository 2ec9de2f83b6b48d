//! Dashboard server binary.
//!
//! Wires the ingestion loader and record store together, runs the first
//! load, starts the periodic reload task, and serves the API until Ctrl-C.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use renova_dashboard::api::{start_server, ApiContext};
use renova_dashboard::config;
use renova_dashboard::ingest::{FsBlobStore, Loader};
use renova_dashboard::store::DataStore;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!(version = config::APP_VERSION, "{} starting", config::APP_NAME);

    let loader = Arc::new(Loader::new(
        Arc::new(FsBlobStore::new(config::blob_dir())),
        config::local_data_path(),
    ));
    let store = Arc::new(DataStore::new());

    // First load before serving, so the store is never empty for a request.
    if let Err(e) = store.reload(loader.clone()).await {
        tracing::error!("Initial data load failed: {e}");
    }

    // Periodic refresh picks up workbook changes behind the store's back.
    {
        let store = store.clone();
        let loader = loader.clone();
        let interval = config::reload_interval();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await; // first tick fires immediately; skip it
            loop {
                ticker.tick().await;
                tracing::info!("Periodic data reload");
                if let Err(e) = store.reload(loader.clone()).await {
                    tracing::error!("Periodic reload failed: {e}");
                }
            }
        });
    }

    let ctx = ApiContext::new(store, loader);
    let mut server = start_server(ctx, config::port()).await?;
    tracing::info!(addr = %server.addr(), "Dashboard available");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Ctrl-C received, shutting down");
    server.shutdown();
    server.wait().await;

    Ok(())
}
