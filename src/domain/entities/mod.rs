//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Link`] - A shortened URL mapping
//! - [`Snippet`] - A shareable, optionally encrypted text
//! - [`ShortCode`] - The six character identifier both are addressed by
//!
//! Creation inputs use separate structs (`NewLink`, `NewSnippet`) since the
//! store assigns `id` and `created_at`.

pub mod link;
pub mod short_code;
pub mod snippet;

pub use link::{Link, LinkUpdate, NewLink};
pub use short_code::ShortCode;
pub use snippet::{NewSnippet, Snippet};
