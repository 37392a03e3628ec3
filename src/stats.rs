//! Store counts and backing-store liveness.

use crate::cache::KeyValueCache;
use crate::db::{Database, UserRepository};
use crate::file::FileRepository;
use crate::Result;

/// Entity counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Registered users.
    pub users: i64,
    /// Stored files and folders.
    pub files: i64,
}

/// Liveness of the backing stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    /// Key-value cache answered.
    pub cache_up: bool,
    /// Document store answered.
    pub store_up: bool,
}

/// Reports counts and liveness.
pub struct StatsReporter<'a> {
    db: &'a Database,
    cache: &'a dyn KeyValueCache,
}

impl<'a> StatsReporter<'a> {
    /// Create a reporter over the given stores.
    pub fn new(db: &'a Database, cache: &'a dyn KeyValueCache) -> Self {
        Self { db, cache }
    }

    /// Count users and files.
    pub async fn stats(&self) -> Result<Stats> {
        let users = UserRepository::new(self.db.pool()).count().await?;
        let files = FileRepository::new(self.db.pool()).count().await?;
        Ok(Stats { users, files })
    }

    /// Probe both stores. Never fails.
    pub async fn health(&self) -> Health {
        let (cache_up, store_up) = tokio::join!(self.cache.is_alive(), self.db.ping());
        Health { cache_up, store_up }
    }
}
