//! HTTP server initialization and runtime setup.
//!
//! Builds the collaborators, wires them into the gated router and runs the
//! Axum server until Ctrl-C.

use crate::config::Config;
use crate::infrastructure::inventory::{CachedInventory, JsonFileSource};
use crate::infrastructure::sessions::InMemorySessionStore;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

/// Builds application state from configuration.
///
/// The inventory is not loaded here; the first gated request loads it.
///
/// # Errors
///
/// Returns an error if the sessions seed file cannot be loaded or the
/// forward header is invalid.
pub fn build_state(config: &Config) -> Result<AppState> {
    let sessions = match &config.sessions_file {
        Some(path) => InMemorySessionStore::from_file(&config.session_cookie, Path::new(path))
            .context("Failed to load sessions file")?,
        None => InMemorySessionStore::new(&config.session_cookie),
    };
    let sessions = Arc::new(sessions);

    let inventory = Arc::new(CachedInventory::new(
        JsonFileSource::new(&config.inventory_file),
        config.inventory_ttl(),
    ));

    Ok(AppState::new(sessions.clone(), sessions, inventory)
        .with_forward_header(config.forward_header_name()?)
        .with_trace_body_limit(config.trace_body_limit))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - State construction fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config)?;
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
