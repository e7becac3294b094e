//! Link creation, resolution and management service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::application::services::code_allocator::{CodeAllocator, CodeNamespace};
use crate::domain::entities::{Link, LinkUpdate, NewLink, ShortCode};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Maximum accepted length of `original_url`, in characters.
pub const MAX_URL_LENGTH: usize = 2048;

/// Result of a create request.
#[derive(Debug, Clone)]
pub struct ShortenOutcome {
    pub link: Link,
    /// `false` when an existing link for the same URL was returned.
    pub created: bool,
}

/// Link codes as seen by the [`CodeAllocator`].
struct LinkCodes<'a, L: ?Sized>(&'a L);

#[async_trait]
impl<L: LinkRepository + ?Sized> CodeNamespace for LinkCodes<'_, L> {
    fn name(&self) -> &'static str {
        "link"
    }

    async fn is_taken(&self, code: &ShortCode) -> Result<bool, AppError> {
        Ok(self.0.find_by_code(code.as_str()).await?.is_some())
    }
}

/// Service for creating, resolving and editing shortened links.
///
/// Holds no state between requests; every call goes to the repository.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    allocator: CodeAllocator,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>, allocator: CodeAllocator) -> Self {
        Self {
            link_repository,
            allocator,
        }
    }

    /// Creates a short link for `original_url`.
    ///
    /// # Deduplication
    ///
    /// If a link for the same URL already exists, it is returned with
    /// `created: false` and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is empty or longer than
    /// [`MAX_URL_LENGTH`]. Returns [`AppError::Internal`] if code allocation
    /// is exhausted or the store fails.
    pub async fn create_link(&self, original_url: String) -> Result<ShortenOutcome, AppError> {
        validate_url(&original_url)?;

        if let Some(existing) = self
            .link_repository
            .find_by_original_url(&original_url)
            .await?
        {
            tracing::debug!(code = %existing.short_code, "Reusing existing link");
            return Ok(ShortenOutcome {
                link: existing,
                created: false,
            });
        }

        let repository = &self.link_repository;
        let link = self
            .allocator
            .insert_unique(&LinkCodes(repository.as_ref()), |code| {
                let repository = Arc::clone(repository);
                let new_link = NewLink {
                    original_url: original_url.clone(),
                    short_code: code.into_string(),
                };
                async move { repository.create(new_link).await }
            })
            .await?;

        tracing::info!(id = link.id, code = %link.short_code, "Link created");

        Ok(ShortenOutcome {
            link,
            created: true,
        })
    }

    /// Resolves a short code to its link.
    ///
    /// Codes that are not six alphanumerics are rejected without a store
    /// query.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn resolve_link(&self, code: &str) -> Result<Link, AppError> {
        let not_found = || AppError::not_found("Short link not found", json!({ "code": code }));

        let Some(code) = ShortCode::parse(code) else {
            return Err(not_found());
        };

        self.link_repository
            .find_by_code(code.as_str())
            .await?
            .ok_or_else(not_found)
    }

    /// Like [`Self::resolve_link`] but returns `Ok(None)` for unknown codes.
    pub async fn find_link(&self, code: &str) -> Result<Option<Link>, AppError> {
        match self.resolve_link(code).await {
            Ok(link) => Ok(Some(link)),
            Err(AppError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Retrieves a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn get_link(&self, id: i64) -> Result<Link, AppError> {
        self.link_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))
    }

    /// Lists all links in insertion order.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.link_repository.list_all().await
    }

    /// Counts stored links.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        self.link_repository.count().await
    }

    /// Overwrites the URL and short code of a link.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the URL is empty/too long or the code is
    ///   not six alphanumerics
    /// - [`AppError::NotFound`] if no link has this id
    /// - [`AppError::Conflict`] if another link already uses the code
    pub async fn edit_link(&self, id: i64, update: LinkUpdate) -> Result<Link, AppError> {
        validate_url(&update.original_url)?;

        if ShortCode::parse(&update.short_code).is_none() {
            return Err(AppError::bad_request(
                "Short code must be exactly 6 letters or digits",
                json!({ "short_code": update.short_code }),
            ));
        }

        let code = update.short_code.clone();
        let updated = self
            .link_repository
            .update(id, update)
            .await
            .map_err(|e| match e {
                AppError::DuplicateCode { .. } => AppError::conflict(
                    "Short code already in use",
                    json!({ "short_code": code }),
                ),
                other => other,
            })?;

        let link =
            updated.ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))?;

        tracing::info!(id, code = %link.short_code, "Link updated");
        Ok(link)
    }

    /// Deletes a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id, including when
    /// it was already deleted.
    pub async fn delete_link(&self, id: i64) -> Result<(), AppError> {
        if !self.link_repository.delete(id).await? {
            return Err(AppError::not_found("Link not found", json!({ "id": id })));
        }

        tracing::info!(id, "Link deleted");
        Ok(())
    }

    /// Builds the shareable short URL of the link with this id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn share_url(&self, id: i64, base_url: &str) -> Result<String, AppError> {
        let link = self.get_link(id).await?;
        Ok(short_url(base_url, &link.short_code))
    }
}

/// Joins the public base URL and a short code.
pub fn short_url(base_url: &str, code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), code)
}

fn validate_url(original_url: &str) -> Result<(), AppError> {
    if original_url.trim().is_empty() {
        return Err(AppError::bad_request(
            "Please provide a URL",
            json!({ "field": "original_url" }),
        ));
    }

    let length = original_url.chars().count();
    if length > MAX_URL_LENGTH {
        return Err(AppError::bad_request(
            format!("URL must be at most {MAX_URL_LENGTH} characters"),
            json!({ "field": "original_url", "length": length }),
        ));
    }

    // Served back verbatim as a `Location` header.
    if let Some(position) = original_url.chars().position(char::is_control) {
        return Err(AppError::bad_request(
            "URL must not contain control characters",
            json!({ "field": "original_url", "position": position }),
        ));
    }

    Ok(())
}
