//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation and code allocation, and
//! expose a small API to the HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::code_allocator::CodeAllocator`] - Unique short code allocation
//! - [`services::link_service::LinkService`] - Link creation, resolution and editing
//! - [`services::snippet_service::SnippetService`] - Snippet storage and decryption
//! - [`services::resolver::CodeResolver`] - Dispatch of `/<code>` across both kinds

pub mod services;
