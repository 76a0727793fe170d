//! Safety API server lifecycle: start and stop the axum HTTP server.
//!
//! bind → spawn background task → return handle with shutdown channel.

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::api::router::safety_api_router;
use crate::config::ConfigError;
use crate::safety::{InteractionTable, SafetyError};

// ═══════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Interaction table error: {0}")]
    Table(#[from] SafetyError),

    #[error("Failed to bind {0}: {1}")]
    Bind(SocketAddr, std::io::Error),

    #[error("Server task failed: {0}")]
    Task(String),
}

// ═══════════════════════════════════════════════════════════
// Server handle
// ═══════════════════════════════════════════════════════════

/// Handle to a running safety API server.
pub struct SafetyServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl SafetyServer {
    /// Send the shutdown signal. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Safety API server shutdown signal sent");
        }
    }

    /// Wait for the server task to finish.
    pub async fn wait(self) -> Result<(), ServerError> {
        self.task
            .await
            .map_err(|e| ServerError::Task(e.to_string()))
    }
}

// ═══════════════════════════════════════════════════════════
// Server lifecycle
// ═══════════════════════════════════════════════════════════

/// Bind `addr`, mount the safety router, and serve in a background task.
///
/// Port 0 picks an ephemeral port; the bound address is on the handle.
pub async fn start_server_on(
    addr: SocketAddr,
    table: Arc<InteractionTable>,
) -> Result<SafetyServer, ServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(addr, e))?;

    let addr = listener
        .local_addr()
        .map_err(|e| ServerError::Bind(addr, e))?;

    let app = safety_api_router(table);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Safety API server received shutdown signal");
        };

        tracing::info!(%addr, "Safety API server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Safety API server error: {e}");
        }

        tracing::info!("Safety API server stopped");
    });

    Ok(SafetyServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
