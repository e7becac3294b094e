//! DTOs for snippet endpoints and short code resolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::link_service::short_url;
use crate::domain::entities::Snippet;

/// Request body for `POST /api/snippets`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSnippetRequest {
    #[validate(length(min = 1, message = "Please provide snippet content"))]
    pub content: String,

    /// When present and non-empty, the content is encrypted with this secret.
    #[serde(default)]
    pub secret_key: Option<String>,
}

/// Response for `POST /api/snippets`.
#[derive(Debug, Serialize)]
pub struct SnippetCreatedResponse {
    pub id: i64,
    pub short_code: String,
    pub short_url: String,
    pub encrypted: bool,
}

/// Listing entry. Content is never included.
#[derive(Debug, Serialize)]
pub struct SnippetSummary {
    pub id: i64,
    pub short_code: String,
    pub short_url: String,
    pub encrypted: bool,
    pub created_at: DateTime<Utc>,
}

impl SnippetSummary {
    pub fn from_snippet(snippet: &Snippet, base_url: &str) -> Self {
        Self {
            id: snippet.id,
            short_code: snippet.short_code.clone(),
            short_url: short_url(base_url, &snippet.short_code),
            encrypted: snippet.encrypted,
            created_at: snippet.created_at,
        }
    }
}

/// Request body for `POST /{code}`.
#[derive(Debug, Default, Deserialize)]
pub struct UnlockRequest {
    #[serde(default)]
    pub secret_key: Option<String>,
}

/// Readable snippet content.
#[derive(Debug, Serialize)]
pub struct SnippetContentResponse {
    pub short_code: String,
    pub content: String,
}

/// Returned with 401 when an encrypted snippet is requested without a key.
#[derive(Debug, Serialize)]
pub struct KeyRequiredResponse {
    pub short_code: String,
    pub key_required: bool,
}
