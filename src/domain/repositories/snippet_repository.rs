//! Repository trait for snippet data access.

use crate::domain::entities::{NewSnippet, Snippet};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing snippets.
///
/// Snippets are immutable once stored; there is no update operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnippetRepository: Send + Sync {
    /// Inserts a new snippet.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateCode`] if the short code is already taken.
    async fn create(&self, new_snippet: NewSnippet) -> Result<Snippet, AppError>;

    /// Finds a snippet by its short code.
    async fn find_by_code(&self, code: &str) -> Result<Option<Snippet>, AppError>;

    /// Finds a snippet by its surrogate id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Snippet>, AppError>;

    /// Lists every snippet ordered by id ascending.
    async fn list_all(&self) -> Result<Vec<Snippet>, AppError>;

    /// Counts stored snippets.
    async fn count(&self) -> Result<i64, AppError>;

    /// Removes a snippet. Only reachable from the admin CLI.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
