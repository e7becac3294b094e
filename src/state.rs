//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{CodeAllocator, CodeResolver, LinkService, SnippetService};
use crate::domain::repositories::{LinkRepository, SnippetRepository};
use crate::infrastructure::persistence::Repositories;

pub type DynLinkService = LinkService<dyn LinkRepository>;
pub type DynSnippetService = SnippetService<dyn SnippetRepository>;
pub type DynCodeResolver = CodeResolver<dyn LinkRepository, dyn SnippetRepository>;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<DynLinkService>,
    pub snippet_service: Arc<DynSnippetService>,
    pub resolver: Arc<DynCodeResolver>,
    /// Public prefix of short URLs, e.g. `https://s.example.com`.
    pub base_url: Arc<str>,
}

impl AppState {
    /// Wires the services on top of the given repositories.
    pub fn new(
        repositories: Repositories,
        allocator: CodeAllocator,
        base_url: impl Into<String>,
    ) -> Self {
        let link_service = Arc::new(LinkService::new(repositories.links, allocator.clone()));
        let snippet_service = Arc::new(SnippetService::new(repositories.snippets, allocator));
        let resolver = Arc::new(CodeResolver::new(
            link_service.clone(),
            snippet_service.clone(),
        ));

        Self {
            link_service,
            snippet_service,
            resolver,
            base_url: Arc::from(base_url.into()),
        }
    }
}
