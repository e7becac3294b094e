//! Snippet creation and retrieval service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::application::services::code_allocator::{CodeAllocator, CodeNamespace};
use crate::domain::entities::{NewSnippet, ShortCode, Snippet};
use crate::domain::repositories::SnippetRepository;
use crate::error::AppError;
use crate::utils::cipher;

/// Snippet codes as seen by the [`CodeAllocator`].
struct SnippetCodes<'a, S: ?Sized>(&'a S);

#[async_trait]
impl<S: SnippetRepository + ?Sized> CodeNamespace for SnippetCodes<'_, S> {
    fn name(&self) -> &'static str {
        "snippet"
    }

    async fn is_taken(&self, code: &ShortCode) -> Result<bool, AppError> {
        Ok(self.0.find_by_code(code.as_str()).await?.is_some())
    }
}

/// Service for storing and reading snippets.
///
/// Content is sealed with [`cipher::encrypt`] when a secret is supplied. The
/// secret is used once and dropped; only the `encrypted` flag is persisted.
pub struct SnippetService<S: SnippetRepository + ?Sized> {
    snippet_repository: Arc<S>,
    allocator: CodeAllocator,
}

impl<S: SnippetRepository + ?Sized> SnippetService<S> {
    /// Creates a new snippet service.
    pub fn new(snippet_repository: Arc<S>, allocator: CodeAllocator) -> Self {
        Self {
            snippet_repository,
            allocator,
        }
    }

    /// Stores a snippet, encrypting it when `secret_key` is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `content` is empty.
    /// Returns [`AppError::Internal`] on encryption, allocation or store
    /// failure.
    pub async fn create_snippet(
        &self,
        content: String,
        secret_key: Option<String>,
    ) -> Result<Snippet, AppError> {
        if content.is_empty() {
            return Err(AppError::bad_request(
                "Please provide snippet content",
                json!({ "field": "content" }),
            ));
        }

        let (stored, encrypted) = match secret_key.filter(|k| !k.is_empty()) {
            Some(key) => (run_blocking(move || cipher::encrypt(&content, &key)).await?, true),
            None => (content, false),
        };

        let repository = &self.snippet_repository;
        let snippet = self
            .allocator
            .insert_unique(&SnippetCodes(repository.as_ref()), |code| {
                let repository = Arc::clone(repository);
                let new_snippet = NewSnippet {
                    content: stored.clone(),
                    short_code: code.into_string(),
                    encrypted,
                };
                async move { repository.create(new_snippet).await }
            })
            .await?;

        tracing::info!(
            id = snippet.id,
            code = %snippet.short_code,
            encrypted,
            "Snippet created"
        );
        Ok(snippet)
    }

    /// Looks up a snippet by code without decrypting it.
    ///
    /// Malformed codes are rejected without a store query.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no snippet has this code.
    pub async fn get_snippet(&self, code: &str) -> Result<Snippet, AppError> {
        let not_found = || AppError::not_found("Snippet not found", json!({ "code": code }));

        let Some(code) = ShortCode::parse(code) else {
            return Err(not_found());
        };

        self.snippet_repository
            .find_by_code(code.as_str())
            .await?
            .ok_or_else(not_found)
    }

    /// Like [`Self::get_snippet`] but returns `Ok(None)` for unknown codes.
    pub async fn find_snippet(&self, code: &str) -> Result<Option<Snippet>, AppError> {
        match self.get_snippet(code).await {
            Ok(snippet) => Ok(Some(snippet)),
            Err(AppError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Returns the readable content of the snippet with this code.
    ///
    /// Plain snippets are returned verbatim and `secret_key` is ignored.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no snippet has this code
    /// - [`AppError::InvalidKey`] if the snippet is encrypted and the key is
    ///   missing or wrong
    pub async fn read_snippet(
        &self,
        code: &str,
        secret_key: Option<&str>,
    ) -> Result<String, AppError> {
        let snippet = self.get_snippet(code).await?;
        open(snippet, secret_key).await
    }

    /// Lists all snippets in insertion order.
    pub async fn list_snippets(&self) -> Result<Vec<Snippet>, AppError> {
        self.snippet_repository.list_all().await
    }

    /// Counts stored snippets.
    pub async fn count_snippets(&self) -> Result<i64, AppError> {
        self.snippet_repository.count().await
    }
}

/// Returns the readable content of an already loaded snippet.
pub(crate) async fn open(snippet: Snippet, secret_key: Option<&str>) -> Result<String, AppError> {
    if !snippet.is_encrypted() {
        return Ok(snippet.content);
    }

    let Some(key) = secret_key.filter(|k| !k.is_empty()).map(str::to_owned) else {
        return Err(AppError::invalid_key(
            "A secret key is required for this snippet",
            json!({ "code": snippet.short_code, "reason": "missing" }),
        ));
    };

    let code = snippet.short_code;
    let sealed = snippet.content;
    run_blocking(move || cipher::decrypt(&sealed, &key))
        .await
        .inspect_err(|_| tracing::debug!(%code, "Snippet decryption rejected"))
}

/// Runs CPU-heavy key derivation off the async workers.
async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        AppError::internal("Cipher task failed", json!({ "reason": e.to_string() }))
    })?
}
