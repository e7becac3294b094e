//! API route configuration.

use crate::api::handlers::{
    create_link_handler, create_snippet_handler, delete_link_handler, get_link_handler,
    health_handler, list_links_handler, list_snippets_handler, share_link_handler,
    update_link_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Link and snippet management routes, nested under `/api`.
///
/// # Endpoints
///
/// - `GET    /health`           - Store reachability and version
/// - `GET    /links`            - List all links (id ascending)
/// - `POST   /links`            - Shorten a URL (deduplicated)
/// - `GET    /links/{id}`       - Fetch a link
/// - `PUT    /links/{id}`       - Replace URL and short code
/// - `DELETE /links/{id}`       - Delete a link
/// - `GET    /links/{id}/share` - Shareable short URL
/// - `GET    /snippets`         - List snippets (without content)
/// - `POST   /snippets`         - Store a snippet
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{id}",
            get(get_link_handler)
                .put(update_link_handler)
                .delete(delete_link_handler),
        )
        .route("/links/{id}/share", get(share_link_handler))
        .route(
            "/snippets",
            get(list_snippets_handler).post(create_snippet_handler),
        )
}
