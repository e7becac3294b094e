//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::link_service::short_url;
use crate::domain::entities::Link;

/// Request body for `POST /api/links`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// URL to shorten. Any non-empty string up to 2048 characters; the
    /// scheme is not checked.
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub original_url: String,
}

/// Request body for `PUT /api/links/{id}`.
///
/// Both fields replace the stored values.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub original_url: String,

    /// New short code, exactly 6 letters or digits.
    #[validate(length(equal = 6, message = "Short code must be 6 characters"))]
    pub short_code: String,
}

/// JSON representation of a link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn from_link(link: Link, base_url: &str) -> Self {
        Self {
            short_url: short_url(base_url, &link.short_code),
            id: link.id,
            original_url: link.original_url,
            short_code: link.short_code,
            created_at: link.created_at,
        }
    }
}

/// Response for `POST /api/links`.
#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    #[serde(flatten)]
    pub link: LinkResponse,
    /// `false` when the URL was already shortened and its code was reused.
    pub created: bool,
}

/// Response for `GET /api/links/{id}/share`.
#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub short_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::link_service::MAX_URL_LENGTH;

    #[test]
    fn test_create_request_rejects_empty_url() {
        let request = CreateLinkRequest {
            original_url: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_length_limit() {
        let ok = CreateLinkRequest {
            original_url: "a".repeat(MAX_URL_LENGTH),
        };
        assert!(ok.validate().is_ok());

        let too_long = CreateLinkRequest {
            original_url: "a".repeat(MAX_URL_LENGTH + 1),
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_update_request_code_length() {
        let request = UpdateLinkRequest {
            original_url: "https://example.com".to_string(),
            short_code: "abc".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_link_response_short_url() {
        let link = Link::new(1, "https://example.com".to_string(), "abc123".to_string(), Utc::now());
        let response = LinkResponse::from_link(link, "https://s.example.com/");

        assert_eq!(response.short_url, "https://s.example.com/abc123");
    }
}
