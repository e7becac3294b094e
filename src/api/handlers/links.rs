//! Handlers for link management endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::links::{
    CreateLinkRequest, CreateLinkResponse, LinkResponse, ShareResponse, UpdateLinkRequest,
};
use crate::domain::entities::LinkUpdate;
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a URL.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "original_url": "https://example.com/a/very/long/path" }
/// ```
///
/// # Response
///
/// - **201 Created** with the new link
/// - **200 OK** with the existing link if the URL was already shortened
///
/// ```json
/// {
///   "id": 1,
///   "original_url": "https://example.com/a/very/long/path",
///   "short_code": "aB3xY9",
///   "short_url": "http://localhost:3000/aB3xY9",
///   "created_at": "2025-01-01T00:00:00Z",
///   "created": true
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is empty or longer than 2048 characters.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<CreateLinkResponse>), AppError> {
    payload.validate()?;

    let outcome = state.link_service.create_link(payload.original_url).await?;

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(CreateLinkResponse {
            link: LinkResponse::from_link(outcome.link, &state.base_url),
            created: outcome.created,
        }),
    ))
}

/// Lists every link in insertion order.
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links().await?;

    Ok(Json(
        links
            .into_iter()
            .map(|link| LinkResponse::from_link(link, &state.base_url))
            .collect(),
    ))
}

/// Returns a single link.
///
/// `GET /api/links/{id}`
pub async fn get_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(id).await?;

    Ok(Json(LinkResponse::from_link(link, &state.base_url)))
}

/// Replaces the URL and short code of a link.
///
/// # Endpoint
///
/// `PUT /api/links/{id}`
///
/// ```json
/// { "original_url": "https://new-destination.com", "short_code": "NewCd1" }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if a field is malformed
/// - 404 Not Found if the link doesn't exist
/// - 409 Conflict if another link already uses the short code
pub async fn update_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .edit_link(
            id,
            LinkUpdate {
                original_url: payload.original_url,
                short_code: payload.short_code,
            },
        )
        .await?;

    Ok(Json(LinkResponse::from_link(link, &state.base_url)))
}

/// Deletes a link.
///
/// `DELETE /api/links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist or was already deleted.
pub async fn delete_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Returns the shareable short URL of a link.
///
/// `GET /api/links/{id}/share`
pub async fn share_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ShareResponse>, AppError> {
    let short_url = state.link_service.share_url(id, &state.base_url).await?;

    Ok(Json(ShareResponse { short_url }))
}
