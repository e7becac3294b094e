//! Infrastructure layer for external integrations.
//!
//! Implements the storage contracts defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL and SQLite repository implementations

pub mod persistence;
