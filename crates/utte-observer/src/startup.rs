//! Observer startup helper for embedding in the engine binary.
//!
//! [`spawn_observer`] binds eagerly, so a bad address or a port in use is
//! reported to the caller before anything runs in the background, then
//! serves on its own Tokio task.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::task::JoinHandle;
use utte_core::config::ServerConfig;

use crate::server::{self, ServerError};
use crate::state::AppState;

/// Errors that can occur when spawning the observer server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind or start.
    #[error("server start error: {0}")]
    Server(#[from] ServerError),
}

/// A running observer.
#[derive(Debug)]
pub struct ObserverHandle {
    /// Address actually bound (useful with port 0).
    pub addr: SocketAddr,
    /// The serving task. Finishes after the shutdown signal fires.
    pub task: JoinHandle<()>,
}

/// Bind `config` and serve on a background task until
/// `state.shutdown` fires.
///
/// # Errors
///
/// Returns [`StartupError::Server`] if the address cannot be bound.
pub async fn spawn_observer(
    config: &ServerConfig,
    state: Arc<AppState>,
) -> Result<ObserverHandle, StartupError> {
    let listener = server::bind(config).await?;
    let addr = listener
        .local_addr()
        .map_err(|e| ServerError::Bind(format!("no local address: {e}")))?;

    let shutdown = state.shutdown.clone();
    let task = tokio::spawn(async move {
        if let Err(e) = server::serve(listener, state, shutdown).await {
            tracing::error!(error = %e, "observer server exited with error");
        }
    });

    tracing::info!(%addr, "observer server spawned on background task");
    Ok(ObserverHandle { addr, task })
}
