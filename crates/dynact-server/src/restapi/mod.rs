//! REST API module

pub mod handlers;
pub mod router;

pub use router::create_router;

use crate::{AppState, ServerError, ServerResult};
use std::net::SocketAddr;

/// Serve the REST API until the state's shutdown token fires.
pub async fn serve(app_state: AppState, addr: &str) -> ServerResult<()> {
    let shutdown = app_state.shutdown.clone();
    let app = create_router(app_state);

    let addr: SocketAddr = addr
        .parse()
        .map_err(|e| ServerError::InvalidInput(format!("Invalid address: {}", e)))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Internal(format!("Failed to bind: {}", e)))?;

    tracing::info!("Starting REST API server on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("REST API server stopped");
    Ok(())
}
