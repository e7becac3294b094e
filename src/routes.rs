//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `/api/*`        - Health check, link and snippet management (JSON)
//! - `GET  /{code}`  - Snippet content or link redirect
//! - `POST /{code}`  - Encrypted snippet content, given a secret key
//!
//! Requests are traced with [`crate::api::middleware::tracing`] and trailing
//! slashes are trimmed before routing. Every single-segment path belongs to
//! `/{code}`, so fixed routes live under `/api`.

use crate::api;
use crate::api::handlers::{resolve_handler, unlock_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the router with all routes and middleware, without path
/// normalization.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/{code}", get(resolve_handler).post(unlock_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application served by the binary.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
