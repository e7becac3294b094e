//! Row types shared by the SQL backends.

use chrono::{DateTime, Utc};

use crate::domain::entities::{Link, Snippet};

pub(crate) const LINK_COLUMNS: &str = "id, original_url, short_code, created_at";
pub(crate) const SNIPPET_COLUMNS: &str = "id, content, short_code, encrypted, created_at";

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct LinkRow {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(r.id, r.original_url, r.short_code, r.created_at)
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct SnippetRow {
    pub id: i64,
    pub content: String,
    pub short_code: String,
    pub encrypted: bool,
    pub created_at: DateTime<Utc>,
}

impl From<SnippetRow> for Snippet {
    fn from(r: SnippetRow) -> Self {
        Snippet::new(r.id, r.content, r.short_code, r.encrypted, r.created_at)
    }
}
