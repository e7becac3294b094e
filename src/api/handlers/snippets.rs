//! Handlers for snippet endpoints.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::snippets::{CreateSnippetRequest, SnippetCreatedResponse, SnippetSummary};
use crate::application::services::link_service::short_url;
use crate::error::AppError;
use crate::state::AppState;

/// Stores a snippet, encrypted if a secret key is supplied.
///
/// # Endpoint
///
/// `POST /api/snippets`
///
/// ```json
/// { "content": "secret plan", "secret_key": "k1" }
/// ```
///
/// The secret is not stored. Readers must supply it again at `POST /{code}`.
///
/// # Errors
///
/// Returns 400 Bad Request if `content` is empty.
pub async fn create_snippet_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateSnippetRequest>,
) -> Result<(StatusCode, Json<SnippetCreatedResponse>), AppError> {
    payload.validate()?;

    let snippet = state
        .snippet_service
        .create_snippet(payload.content, payload.secret_key)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SnippetCreatedResponse {
            id: snippet.id,
            short_url: short_url(&state.base_url, &snippet.short_code),
            short_code: snippet.short_code,
            encrypted: snippet.encrypted,
        }),
    ))
}

/// Lists snippets in insertion order, without their content.
///
/// `GET /api/snippets`
pub async fn list_snippets_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<SnippetSummary>>, AppError> {
    let snippets = state.snippet_service.list_snippets().await?;

    Ok(Json(
        snippets
            .iter()
            .map(|s| SnippetSummary::from_snippet(s, &state.base_url))
            .collect(),
    ))
}
