//! SQLite implementation of snippet repository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;

use super::rows::{SNIPPET_COLUMNS, SnippetRow};
use crate::domain::entities::{NewSnippet, Snippet};
use crate::domain::repositories::SnippetRepository;
use crate::error::AppError;

/// SQLite repository for snippet storage.
pub struct SqliteSnippetRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteSnippetRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SnippetRepository for SqliteSnippetRepository {
    async fn create(&self, new_snippet: NewSnippet) -> Result<Snippet, AppError> {
        let row = sqlx::query_as::<_, SnippetRow>(&format!(
            "INSERT INTO snippets (content, short_code, encrypted, created_at) \
             VALUES (?, ?, ?, ?) RETURNING {SNIPPET_COLUMNS}"
        ))
        .bind(&new_snippet.content)
        .bind(&new_snippet.short_code)
        .bind(new_snippet.encrypted)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Snippet>, AppError> {
        let row = sqlx::query_as::<_, SnippetRow>(&format!(
            "SELECT {SNIPPET_COLUMNS} FROM snippets WHERE short_code = ?"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Snippet::from))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Snippet>, AppError> {
        let row = sqlx::query_as::<_, SnippetRow>(&format!(
            "SELECT {SNIPPET_COLUMNS} FROM snippets WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Snippet::from))
    }

    async fn list_all(&self) -> Result<Vec<Snippet>, AppError> {
        let rows = sqlx::query_as::<_, SnippetRow>(&format!(
            "SELECT {SNIPPET_COLUMNS} FROM snippets ORDER BY id ASC"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Snippet::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM snippets")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM snippets WHERE id = ?")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
