//! Shared application state for handlers.

use std::sync::Arc;

use crate::auth::SessionTokenManager;
use crate::cache::SharedCache;
use crate::db::Database;
use crate::file::{FileService, LocalBlobStore, ThumbnailSender};
use crate::stats::StatsReporter;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Document store.
    pub db: Arc<Database>,
    /// Key-value cache.
    pub cache: SharedCache,
    /// Session tokens over `cache`.
    pub sessions: SessionTokenManager,
    /// Blob storage.
    pub store: LocalBlobStore,
    /// Thumbnail queue, when a worker is running.
    pub thumbnails: Option<ThumbnailSender>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Arc<Database>, cache: SharedCache, store: LocalBlobStore) -> Self {
        Self {
            db,
            sessions: SessionTokenManager::new(cache.clone()),
            cache,
            store,
            thumbnails: None,
        }
    }

    /// Attach a thumbnail queue.
    pub fn with_thumbnails(mut self, sender: ThumbnailSender) -> Self {
        self.thumbnails = Some(sender);
        self
    }

    /// File service bound to this state.
    pub fn files(&self) -> FileService<'_> {
        FileService::new(self.db.pool(), &self.store).with_thumbnails(self.thumbnails.as_ref())
    }

    /// Stats reporter bound to this state.
    pub fn stats(&self) -> StatsReporter<'_> {
        StatsReporter::new(&self.db, self.cache.as_ref())
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .field("thumbnails", &self.thumbnails.is_some())
            .finish()
    }
}
