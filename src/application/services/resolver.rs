//! Dispatch of the shared `/<code>` route to snippets or links.
//!
//! Links and snippets have independent code namespaces, so one code can name
//! both. The snippet namespace is checked first; the link namespace is only
//! consulted when no snippet has the code.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::link_service::LinkService;
use crate::application::services::snippet_service::{self, SnippetService};
use crate::domain::repositories::{LinkRepository, SnippetRepository};
use crate::error::AppError;
use crate::utils::code_generator::is_valid_code;

/// What a short code resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Readable snippet content.
    Snippet { code: String, content: String },
    /// An encrypted snippet was found but no key was supplied.
    KeyRequired { code: String },
    /// A link; the caller should redirect.
    Redirect { code: String, original_url: String },
}

/// Resolves short codes across both namespaces.
pub struct CodeResolver<L: LinkRepository + ?Sized, S: SnippetRepository + ?Sized> {
    links: Arc<LinkService<L>>,
    snippets: Arc<SnippetService<S>>,
}

impl<L, S> CodeResolver<L, S>
where
    L: LinkRepository + ?Sized,
    S: SnippetRepository + ?Sized,
{
    pub fn new(links: Arc<LinkService<L>>, snippets: Arc<SnippetService<S>>) -> Self {
        Self { links, snippets }
    }

    /// Resolves `code`, decrypting the snippet with `secret_key` if needed.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if neither namespace has the code, or it is
    ///   malformed
    /// - [`AppError::InvalidKey`] if a key was supplied for an encrypted
    ///   snippet and it does not decrypt
    pub async fn resolve(
        &self,
        code: &str,
        secret_key: Option<&str>,
    ) -> Result<Resolution, AppError> {
        if !is_valid_code(code) {
            return Err(not_found(code));
        }

        if let Some(snippet) = self.snippets.find_snippet(code).await? {
            tracing::debug!(code, encrypted = snippet.encrypted, "Resolved to snippet");

            let has_key = secret_key.is_some_and(|k| !k.is_empty());
            if snippet.is_encrypted() && !has_key {
                return Ok(Resolution::KeyRequired {
                    code: code.to_string(),
                });
            }

            let content = snippet_service::open(snippet, secret_key).await?;
            return Ok(Resolution::Snippet {
                code: code.to_string(),
                content,
            });
        }

        if let Some(link) = self.links.find_link(code).await? {
            tracing::debug!(code, "Resolved to link");
            return Ok(Resolution::Redirect {
                code: link.short_code,
                original_url: link.original_url,
            });
        }

        Err(not_found(code))
    }
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("Short code not found", json!({ "code": code }))
}
