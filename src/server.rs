//! HTTP server initialization and runtime setup.
//!
//! Opens the store, applies migrations, wires the services and runs the Axum
//! server until Ctrl-C.

use crate::application::services::CodeAllocator;
use crate::config::Config;
use crate::infrastructure::persistence::Database;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Connection pool for the configured backend
/// - Embedded migrations
/// - Link, snippet and resolver services
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let db = Database::connect(&config.database_url, &config.pool_settings()).await?;
    tracing::info!(backend = db.backend(), "Connected to database");

    db.migrate().await?;
    tracing::info!("Migrations applied");

    let allocator = CodeAllocator::new(config.code_max_attempts);
    let state = AppState::new(db.repositories(), allocator, config.base_url.clone());

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
