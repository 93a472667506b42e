//! Post service: maps HTTP DTOs onto the repository contract.
//!
//! Holds no state besides the repository; errors pass through unchanged so
//! the HTTP layer can tell `NotFound` from everything else.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use blog_core::error::{BlogError, Result};
use blog_core::{Post, PostId};

use crate::storage::PostRepository;

/// Post as exchanged over HTTP.
///
/// Missing fields deserialize as empty so `validate` can report them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDto {
    #[serde(default)]
    pub id: PostId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
}

impl PostDto {
    /// Required-field check applied to new posts.
    pub fn validate(&self) -> Result<()> {
        for (field, v) in [
            ("title", &self.title),
            ("content", &self.content),
            ("author", &self.author),
        ] {
            if v.trim().is_empty() {
                return Err(BlogError::BadRequest(format!("{field} is required")));
            }
        }
        Ok(())
    }
}

impl From<Post> for PostDto {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            title: p.title,
            content: p.content,
            author: p.author,
        }
    }
}

impl From<PostDto> for Post {
    fn from(d: PostDto) -> Self {
        Post {
            id: d.id,
            title: d.title,
            content: d.content,
            author: d.author,
        }
    }
}

pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub fn create_post(&self, post: PostDto) -> Result<PostDto> {
        tracing::debug!("creating a new post");
        self.repo.create(post.into()).map(PostDto::from)
    }

    pub fn get_posts(&self) -> Result<Vec<PostDto>> {
        tracing::debug!("retrieving all posts");
        let posts = self.repo.get_all()?;
        Ok(posts.into_iter().map(PostDto::from).collect())
    }

    pub fn get_post(&self, id: PostId) -> Result<PostDto> {
        tracing::debug!(id, "retrieving post by id");
        self.repo.get_by_id(id).map(PostDto::from)
    }

    pub fn update_post(&self, post: PostDto) -> Result<()> {
        tracing::debug!(post_id = post.id, "updating post");
        self.repo.update(post.into())
    }

    pub fn delete_post(&self, id: PostId) -> Result<()> {
        tracing::debug!(id, "deleting post");
        self.repo.delete(id)
    }
}
