//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod links;
pub mod resolve;
pub mod snippets;

pub use health::health_handler;
pub use links::{
    create_link_handler, delete_link_handler, get_link_handler, list_links_handler,
    share_link_handler, update_link_handler,
};
pub use resolve::{resolve_handler, unlock_handler};
pub use snippets::{create_snippet_handler, list_snippets_handler};
