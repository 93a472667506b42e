//! Latency-reporting repository decorator.
//!
//! Forwards every call to the wrapped repository and reports the elapsed time
//! under the operation name, including when the call fails. Results and
//! errors pass through untouched.

use std::sync::Arc;
use std::time::Instant;

use blog_core::{Post, PostId, Result};

use super::PostRepository;

/// Metrics sink for storage query latency.
pub trait QueryMetrics: Send + Sync {
    fn observe_query_duration(&self, start: Instant, name: &'static str);
}

pub struct MeteredRepository {
    inner: Arc<dyn PostRepository>,
    metrics: Arc<dyn QueryMetrics>,
}

impl MeteredRepository {
    pub fn new(inner: Arc<dyn PostRepository>, metrics: Arc<dyn QueryMetrics>) -> Self {
        Self { inner, metrics }
    }

    fn timed<T>(&self, name: &'static str, op: impl FnOnce(&dyn PostRepository) -> T) -> T {
        let start = Instant::now();
        let out = op(self.inner.as_ref());
        self.metrics.observe_query_duration(start, name);
        out
    }
}

impl PostRepository for MeteredRepository {
    fn create(&self, post: Post) -> Result<Post> {
        self.timed("Create", |db| db.create(post))
    }

    fn get_all(&self) -> Result<Vec<Post>> {
        self.timed("GetAll", |db| db.get_all())
    }

    fn get_by_id(&self, id: PostId) -> Result<Post> {
        self.timed("GetByID", |db| db.get_by_id(id))
    }

    fn update(&self, post: Post) -> Result<()> {
        self.timed("Update", |db| db.update(post))
    }

    fn delete(&self, id: PostId) -> Result<()> {
        self.timed("Delete", |db| db.delete(id))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use blog_core::BlogError;

    use super::*;
    use crate::storage::InMemoryPostRepository;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<&'static str>>,
    }

    impl QueryMetrics for Recorder {
        fn observe_query_duration(&self, start: Instant, name: &'static str) {
            assert!(start <= Instant::now());
            self.calls.lock().unwrap().push(name);
        }
    }

    fn metered() -> (MeteredRepository, Arc<Recorder>) {
        let rec = Arc::new(Recorder::default());
        let repo = MeteredRepository::new(Arc::new(InMemoryPostRepository::new()), rec.clone());
        (repo, rec)
    }

    #[test]
    fn reports_every_operation_by_name() {
        let (repo, rec) = metered();
        let created = repo.create(Post::draft("A", "c", "x")).unwrap();
        repo.get_all().unwrap();
        repo.get_by_id(created.id).unwrap();
        repo.update(Post::draft("B", "c", "x").with_id(created.id)).unwrap();
        repo.delete(created.id).unwrap();

        assert_eq!(
            *rec.calls.lock().unwrap(),
            vec!["Create", "GetAll", "GetByID", "Update", "Delete"]
        );
    }

    #[test]
    fn reports_failures_and_passes_errors_through() {
        let (repo, rec) = metered();
        assert!(matches!(repo.get_by_id(5), Err(BlogError::NotFound(5))));
        assert!(matches!(
            repo.update(Post::draft("X", "", "").with_id(99)),
            Err(BlogError::NotFound(99))
        ));
        assert!(matches!(repo.delete(7), Err(BlogError::NotFound(7))));

        assert_eq!(*rec.calls.lock().unwrap(), vec!["GetByID", "Update", "Delete"]);
    }
}
