//! Shared application state for the blog server.
//!
//! Wiring: `PostService` -> `MeteredRepository` -> `InMemoryPostRepository`.
//! The bare store is kept alongside so snapshot load/save can reach it
//! without going through the request path.

use std::path::Path;
use std::sync::Arc;

use blog_core::error::Result;

use crate::config::ServerConfig;
use crate::obs::ServerMetrics;
use crate::service::PostService;
use crate::storage::{InMemoryPostRepository, MeteredRepository};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServerConfig,
    store: Arc<InMemoryPostRepository>,
    service: PostService,
    metrics: Arc<ServerMetrics>,
}

impl AppState {
    /// Build application state over an empty store.
    ///
    /// When `storage.snapshot_path` names an existing file it is loaded
    /// first; a corrupt snapshot fails startup instead of being ignored.
    pub fn new(cfg: ServerConfig) -> Result<Self> {
        let store = Arc::new(InMemoryPostRepository::new());

        if let Some(path) = cfg.storage.snapshot_path.as_deref() {
            if Path::new(path).exists() {
                store.load_from_file(path)?;
            } else {
                tracing::info!(%path, "no snapshot yet, starting empty");
            }
        }

        Ok(Self::with_store(cfg, store))
    }

    /// Build application state over an existing store.
    pub fn with_store(cfg: ServerConfig, store: Arc<InMemoryPostRepository>) -> Self {
        let metrics = Arc::new(ServerMetrics::new());
        let metered = MeteredRepository::new(store.clone(), metrics.clone());
        let service = PostService::new(Arc::new(metered));

        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                store,
                service,
                metrics,
            }),
        }
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn service(&self) -> &PostService {
        &self.inner.service
    }

    pub fn metrics(&self) -> Arc<ServerMetrics> {
        Arc::clone(&self.inner.metrics)
    }

    pub fn store(&self) -> Arc<InMemoryPostRepository> {
        Arc::clone(&self.inner.store)
    }

    /// Write the current record set to the configured snapshot path.
    /// No-op when persistence is disabled.
    pub fn save_snapshot(&self) -> Result<()> {
        match self.cfg().storage.snapshot_path.as_deref() {
            Some(path) => self.inner.store.save_to_file(path),
            None => Ok(()),
        }
    }
}
