//! Storage layer: the post repository contract and its implementations.
//!
//! - `memory`: concurrent in-memory store with autoincrement IDs and
//!   optional snapshot persistence.
//! - `metered`: latency-reporting decorator over any repository.
//! - `snapshot`: JSON snapshot codec and file helpers.

pub mod memory;
pub mod metered;
pub mod snapshot;

use blog_core::{Post, PostId, Result};

pub use memory::InMemoryPostRepository;
pub use metered::{MeteredRepository, QueryMetrics};

/// CRUD contract the service layer depends on.
///
/// Implementations must be safe for concurrent callers without external
/// locking; `update` and `delete` fail with `BlogError::NotFound` and leave
/// the store untouched when the ID does not exist.
pub trait PostRepository: Send + Sync {
    /// Insert `post` under a freshly allocated ID. Any `post.id` is ignored.
    /// Returns the stored record.
    fn create(&self, post: Post) -> Result<Post>;
    /// Every stored post, in no particular order.
    fn get_all(&self) -> Result<Vec<Post>>;
    fn get_by_id(&self, id: PostId) -> Result<Post>;
    /// Replace title/content/author of the post with `post.id`.
    fn update(&self, post: Post) -> Result<()>;
    fn delete(&self, id: PostId) -> Result<()>;
}
