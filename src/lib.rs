//! # Linkpaste
//!
//! A URL shortener and snippet sharing service built with Axum and SQLx.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Links, snippets and repository traits
//! - **Application Layer** ([`application`]) - Code allocation, link and snippet services, code resolution
//! - **Infrastructure Layer** ([`infrastructure`]) - PostgreSQL and SQLite stores
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Short links with 6-character alphanumeric codes, deduplicated by URL
//! - Text snippets, optionally encrypted with a caller-supplied secret key
//! - One public route per code: snippet content or a redirect to the link
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://linkpaste.db"
//! export BASE_URL="http://localhost:3000"
//!
//! # Migrations are applied on startup
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        CodeAllocator, CodeResolver, LinkService, Resolution, SnippetService,
    };
    pub use crate::domain::entities::{Link, NewLink, NewSnippet, Snippet};
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::{Database, PoolSettings};
    pub use crate::state::AppState;
}
