//! Business logic services for the application layer.

pub mod code_allocator;
pub mod link_service;
pub mod resolver;
pub mod snippet_service;

pub use code_allocator::{CodeAllocator, CodeNamespace};
pub use link_service::{LinkService, ShortenOutcome};
pub use resolver::{CodeResolver, Resolution};
pub use snippet_service::SnippetService;
