//! Snippet entity representing shareable text content.

use chrono::{DateTime, Utc};

/// A stored text snippet.
///
/// When `encrypted` is set, `content` holds the sealed form produced by
/// [`crate::utils::cipher::encrypt`]. The secret used to seal it is not part
/// of the record.
#[derive(Debug, Clone, PartialEq)]
pub struct Snippet {
    pub id: i64,
    pub content: String,
    pub short_code: String,
    pub encrypted: bool,
    pub created_at: DateTime<Utc>,
}

impl Snippet {
    /// Creates a new Snippet instance.
    pub fn new(
        id: i64,
        content: String,
        short_code: String,
        encrypted: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            content,
            short_code,
            encrypted,
            created_at,
        }
    }

    /// Returns true if a secret is required to read the content.
    pub fn is_encrypted(&self) -> bool {
        self.encrypted
    }
}

/// Input data for creating a new snippet.
#[derive(Debug, Clone)]
pub struct NewSnippet {
    pub content: String,
    pub short_code: String,
    pub encrypted: bool,
}
