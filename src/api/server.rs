//! HTTP server lifecycle: bind → spawn background task → return a handle
//! with a shutdown channel.

use std::net::SocketAddr;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::api::router::dashboard_router;
use crate::api::types::ApiContext;

/// Handle to a running dashboard server.
pub struct DashboardServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl DashboardServer {
    /// The address the server actually bound (useful with port 0).
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Signal graceful shutdown. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Dashboard server shutdown signal sent");
        }
    }

    /// Wait for the server task to finish.
    pub async fn wait(self) {
        if let Err(e) = self.task.await {
            tracing::error!("Dashboard server task failed: {e}");
        }
    }
}

/// Bind the dashboard server and spawn it in a background task.
pub async fn start_server(ctx: ApiContext, port: u16) -> std::io::Result<DashboardServer> {
    let listener =
        tokio::net::TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], port))).await?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "Dashboard server binding");

    let app = dashboard_router(ctx);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Dashboard server received shutdown signal");
        };

        tracing::info!(%addr, "Dashboard server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Dashboard server error: {e}");
        }

        tracing::info!("Dashboard server stopped");
    });

    Ok(DashboardServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::ingest::{FsBlobStore, Loader};
    use crate::store::DataStore;

    fn test_ctx(dir: &std::path::Path) -> ApiContext {
        let loader = Arc::new(Loader::new(
            Arc::new(FsBlobStore::new(dir.to_path_buf())),
            dir.join("missing.xlsx"),
        ));
        ApiContext::new(Arc::new(DataStore::new()), loader)
    }

    #[tokio::test]
    async fn start_serves_and_stops() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = start_server(test_ctx(dir.path()), 0).await.unwrap();
        assert!(server.addr().port() > 0);

        server.shutdown();
        server.wait().await;
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = start_server(test_ctx(dir.path()), 0).await.unwrap();

        server.shutdown();
        server.shutdown();
        server.wait().await;
    }
}
