//! Handlers for the public `/{code}` route.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::snippets::{KeyRequiredResponse, SnippetContentResponse, UnlockRequest};
use crate::application::services::Resolution;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a short code.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Resolution Order
///
/// 1. Snippet with this code: content (200), or 401 if it is encrypted
/// 2. Link with this code: 307 Temporary Redirect to the original URL
/// 3. Otherwise 404 Not Found
///
/// Codes that are not six letters or digits are answered with 404 without
/// touching the store.
pub async fn resolve_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let resolution = state.resolver.resolve(&code, None).await?;
    render(resolution)
}

/// Reads an encrypted snippet with a secret key.
///
/// # Endpoint
///
/// `POST /{code}`
///
/// ```json
/// { "secret_key": "k1" }
/// ```
///
/// # Errors
///
/// - 401 `invalid_key` if the key does not decrypt the snippet
/// - 404 Not Found if no snippet or link has this code
pub async fn unlock_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    payload: Option<Json<UnlockRequest>>,
) -> Result<Response, AppError> {
    let Json(request) = payload.unwrap_or_default();

    let resolution = state
        .resolver
        .resolve(&code, request.secret_key.as_deref())
        .await?;
    render(resolution)
}

fn render(resolution: Resolution) -> Result<Response, AppError> {
    let response = match resolution {
        Resolution::Snippet { code, content } => Json(SnippetContentResponse {
            short_code: code,
            content,
        })
        .into_response(),
        Resolution::KeyRequired { code } => (
            StatusCode::UNAUTHORIZED,
            Json(KeyRequiredResponse {
                short_code: code,
                key_required: true,
            }),
        )
            .into_response(),
        Resolution::Redirect { code, original_url } => {
            let location = HeaderValue::try_from(original_url).map_err(|_| {
                tracing::error!(%code, "Stored URL is not a valid Location header");
                AppError::internal(
                    "Stored URL cannot be redirected to",
                    json!({ "code": code }),
                )
            })?;
            (StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response()
        }
    };

    Ok(response)
}
