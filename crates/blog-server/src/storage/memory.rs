//! In-memory post repository.
//!
//! Layout:
//! - `posts: DashMap<PostId, Post>`: sharded map, per-key operations are
//!   atomic under the shard lock.
//! - `next_id: AtomicI64`: allocator, bumped with a checked `fetch_update` so
//!   concurrent creates never share an ID. It never moves backwards or wraps,
//!   so deleted IDs are never handed out again. `i64::MAX` itself is never
//!   allocated; once the counter reaches it, `create` fails.
//! - `gate: RwLock<()>`: taken shared by every CRUD call and exclusively by
//!   `import_snapshot`, which swaps the whole record set and the counter as
//!   one step. Never held across file I/O.

use std::path::Path;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bytes::Bytes;
use dashmap::DashMap;

use blog_core::{BlogError, Post, PostId, Result};

use super::snapshot;
use super::PostRepository;

const FIRST_ID: PostId = 1;

pub struct InMemoryPostRepository {
    posts: DashMap<PostId, Post>,
    next_id: AtomicI64,
    gate: RwLock<()>,
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: DashMap::new(),
            next_id: AtomicI64::new(FIRST_ID),
            gate: RwLock::new(()),
        }
    }

    /// Number of stored posts.
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// ID the next `create` will receive (absent concurrent creates).
    pub fn peek_next_id(&self) -> PostId {
        self.next_id.load(Ordering::Relaxed)
    }

    // The gate guards no data, so a poisoned lock is still safe to reuse.
    fn shared(&self) -> RwLockReadGuard<'_, ()> {
        self.gate.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn exclusive(&self) -> RwLockWriteGuard<'_, ()> {
        self.gate.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Serialize the full record set (sorted by ID) as a JSON array.
    pub fn export_snapshot(&self) -> Result<Bytes> {
        let mut posts = self.get_all()?;
        posts.sort_unstable_by_key(|p| p.id);
        let out = snapshot::encode(&posts)?;
        tracing::info!(posts = posts.len(), bytes = out.len(), "snapshot exported");
        Ok(out)
    }

    /// Replace the record set with the posts in `raw`.
    ///
    /// All-or-nothing: malformed input fails with `BlogError::Deserialization`
    /// before anything is touched. On success the allocator becomes
    /// `max(current, highest imported id + 1)`.
    pub fn import_snapshot(&self, raw: &[u8]) -> Result<()> {
        let posts = snapshot::decode(raw)?;
        let count = posts.len();
        let floor = posts.iter().map(|p| p.id + 1).max();

        let _gate = self.exclusive();
        self.posts.clear();
        for p in posts {
            self.posts.insert(p.id, p);
        }
        if let Some(floor) = floor {
            self.next_id.fetch_max(floor, Ordering::Relaxed);
        }

        tracing::info!(posts = count, next_id = self.peek_next_id(), "snapshot imported");
        Ok(())
    }

    /// Export and write the snapshot to `path`.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = self.export_snapshot()?;
        snapshot::write_file(path, &data)?;
        tracing::info!(path = %path.display(), "snapshot saved");
        Ok(())
    }

    /// Read `path` and import its snapshot. The store is untouched on failure.
    pub fn load_from_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = snapshot::read_file(path)?;
        self.import_snapshot(&data)?;
        tracing::info!(path = %path.display(), "snapshot loaded");
        Ok(())
    }
}

impl PostRepository for InMemoryPostRepository {
    fn create(&self, post: Post) -> Result<Post> {
        let _gate = self.shared();
        let id = self
            .next_id
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
            .map_err(|_| BlogError::Internal("post id space exhausted".into()))?;
        let post = post.with_id(id);
        self.posts.insert(id, post.clone());
        tracing::debug!(id, "post created");
        Ok(post)
    }

    fn get_all(&self) -> Result<Vec<Post>> {
        let _gate = self.shared();
        Ok(self.posts.iter().map(|r| r.value().clone()).collect())
    }

    fn get_by_id(&self, id: PostId) -> Result<Post> {
        let _gate = self.shared();
        self.posts
            .get(&id)
            .map(|r| r.value().clone())
            .ok_or(BlogError::NotFound(id))
    }

    fn update(&self, post: Post) -> Result<()> {
        let _gate = self.shared();
        let mut slot = self
            .posts
            .get_mut(&post.id)
            .ok_or(BlogError::NotFound(post.id))?;
        let stored = slot.value_mut();
        stored.title = post.title;
        stored.content = post.content;
        stored.author = post.author;
        tracing::debug!(id = post.id, "post updated");
        Ok(())
    }

    fn delete(&self, id: PostId) -> Result<()> {
        let _gate = self.shared();
        self.posts.remove(&id).ok_or(BlogError::NotFound(id))?;
        tracing::debug!(id, "post deleted");
        Ok(())
    }
}
