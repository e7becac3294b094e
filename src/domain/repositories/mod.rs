//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for service tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Link CRUD and deduplication lookups
//! - [`SnippetRepository`] - Snippet storage and lookup
//!
//! Both enforce `short_code` uniqueness at the storage layer and report a
//! violation as [`crate::error::AppError::DuplicateCode`].

pub mod link_repository;
pub mod snippet_repository;

pub use link_repository::LinkRepository;
pub use snippet_repository::SnippetRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use snippet_repository::MockSnippetRepository;
