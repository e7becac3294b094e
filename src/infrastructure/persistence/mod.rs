//! SQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx.
//! The backend is chosen from the `DATABASE_URL` scheme:
//!
//! - `postgres://` / `postgresql://` - [`PgLinkRepository`], [`PgSnippetRepository`]
//! - `sqlite:` - [`SqliteLinkRepository`], [`SqliteSnippetRepository`]
//!
//! Each backend embeds its own migrations, applied by [`Database::migrate`].

pub mod pg_link_repository;
pub mod pg_snippet_repository;
mod rows;
pub mod sqlite_link_repository;
pub mod sqlite_snippet_repository;

pub use pg_link_repository::PgLinkRepository;
pub use pg_snippet_repository::PgSnippetRepository;
pub use sqlite_link_repository::SqliteLinkRepository;
pub use sqlite_snippet_repository::SqliteSnippetRepository;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{PgPool, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::repositories::{LinkRepository, SnippetRepository};

/// Connection pool settings.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

/// An open connection pool for one of the supported backends.
#[derive(Clone)]
pub enum Database {
    Postgres(Arc<PgPool>),
    Sqlite(Arc<SqlitePool>),
}

impl Database {
    /// Opens a pool for `database_url`.
    ///
    /// SQLite files are created if missing. An in-memory SQLite database is
    /// private to its connection, so such pools are capped at one connection.
    ///
    /// # Errors
    ///
    /// Returns an error for unsupported schemes or if the connection fails.
    pub async fn connect(database_url: &str, settings: &PoolSettings) -> Result<Self> {
        if is_postgres_url(database_url) {
            let pool = PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .acquire_timeout(settings.connect_timeout)
                .idle_timeout(settings.idle_timeout)
                .max_lifetime(settings.max_lifetime)
                .connect(database_url)
                .await
                .context("Failed to connect to PostgreSQL")?;

            return Ok(Self::Postgres(Arc::new(pool)));
        }

        if is_sqlite_url(database_url) {
            let options = SqliteConnectOptions::from_str(database_url)
                .context("Invalid SQLite URL")?
                .create_if_missing(true);

            let max_connections = if database_url.contains(":memory:") {
                1
            } else {
                settings.max_connections
            };

            let pool = SqlitePoolOptions::new()
                .max_connections(max_connections)
                .acquire_timeout(settings.connect_timeout)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await
                .context("Failed to open SQLite database")?;

            return Ok(Self::Sqlite(Arc::new(pool)));
        }

        anyhow::bail!("Unsupported database URL scheme")
    }

    /// Applies the embedded migrations for this backend.
    pub async fn migrate(&self) -> Result<()> {
        match self {
            Self::Postgres(pool) => sqlx::migrate!("./migrations/postgres")
                .run(pool.as_ref())
                .await
                .context("Failed to migrate PostgreSQL")?,
            Self::Sqlite(pool) => sqlx::migrate!("./migrations/sqlite")
                .run(pool.as_ref())
                .await
                .context("Failed to migrate SQLite")?,
        }

        Ok(())
    }

    /// Builds the repositories backed by this pool.
    pub fn repositories(&self) -> Repositories {
        match self {
            Self::Postgres(pool) => Repositories {
                links: Arc::new(PgLinkRepository::new(pool.clone())),
                snippets: Arc::new(PgSnippetRepository::new(pool.clone())),
            },
            Self::Sqlite(pool) => Repositories {
                links: Arc::new(SqliteLinkRepository::new(pool.clone())),
                snippets: Arc::new(SqliteSnippetRepository::new(pool.clone())),
            },
        }
    }

    /// Backend name for logs.
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Sqlite(_) => "sqlite",
        }
    }

    /// Closes the pool, waiting for in-flight connections.
    pub async fn close(&self) {
        match self {
            Self::Postgres(pool) => pool.close().await,
            Self::Sqlite(pool) => pool.close().await,
        }
    }
}

/// Type-erased repositories handed to the services.
#[derive(Clone)]
pub struct Repositories {
    pub links: Arc<dyn LinkRepository>,
    pub snippets: Arc<dyn SnippetRepository>,
}

pub fn is_postgres_url(url: &str) -> bool {
    url.starts_with("postgres://") || url.starts_with("postgresql://")
}

pub fn is_sqlite_url(url: &str) -> bool {
    url.starts_with("sqlite:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_schemes() {
        assert!(is_postgres_url("postgres://u:p@localhost/db"));
        assert!(is_postgres_url("postgresql://localhost/db"));
        assert!(is_sqlite_url("sqlite::memory:"));
        assert!(is_sqlite_url("sqlite://data/linkpaste.db"));
        assert!(!is_sqlite_url("mysql://localhost/db"));
        assert!(!is_postgres_url("mysql://localhost/db"));
    }

    #[tokio::test]
    async fn test_connect_rejects_unknown_scheme() {
        let result = Database::connect("mysql://localhost/db", &PoolSettings::default()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_sqlite_memory_migrates() {
        let db = Database::connect("sqlite::memory:", &PoolSettings::default())
            .await
            .unwrap();
        db.migrate().await.unwrap();

        assert_eq!(db.backend(), "sqlite");
        let repos = db.repositories();
        assert_eq!(repos.links.count().await.unwrap(), 0);
        assert_eq!(repos.snippets.count().await.unwrap(), 0);
    }
}
