//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /api/health`
///
/// # Response Codes
///
/// - **200 OK**: Both stores reachable
/// - **503 Service Unavailable**: A store query failed
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let link_store = match state.link_service.count_links().await {
        Ok(count) => CheckStatus::ok(format!("{count} links")),
        Err(e) => CheckStatus::error(e.to_string()),
    };

    let snippet_store = match state.snippet_service.count_snippets().await {
        Ok(count) => CheckStatus::ok(format!("{count} snippets")),
        Err(e) => CheckStatus::error(e.to_string()),
    };

    let all_healthy = link_store.is_ok() && snippet_store.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            link_store,
            snippet_store,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
