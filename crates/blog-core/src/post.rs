//! The post record.
//!
//! The store treats `title`, `content`, and `author` as opaque text; only
//! `id` carries meaning, and the store alone assigns it.

use serde::{Deserialize, Serialize};

/// Post identifier. Allocated by the store, starting at 1.
pub type PostId = i64;

/// A blog post as held by the store and written to snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author: String,
}

impl Post {
    /// Build a post with no ID yet; the store assigns one on create.
    pub fn draft(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            content: content.into(),
            author: author.into(),
        }
    }

    /// Same post with `id` replaced.
    pub fn with_id(mut self, id: PostId) -> Self {
        self.id = id;
        self
    }
}
