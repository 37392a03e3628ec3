//! Key-value cache module for filedepot.
//!
//! Sessions live only in a cache with per-key expiry. The cache is reached
//! through [`KeyValueCache`] so the HTTP layer can run against Redis in
//! production and an in-process map in tests.

mod memory;
mod redis;

pub use self::memory::MemoryCache;
pub use self::redis::RedisCache;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{CacheBackend, CacheConfig};
use crate::Result;

/// Minimal contract the core needs from a key-value store.
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    /// Whether the store is reachable. Never fails.
    async fn is_alive(&self) -> bool;

    /// Get the value stored under `key`, if present and not expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, expiring after `ttl`.
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Delete `key`. Deleting a missing key is not an error.
    async fn del(&self, key: &str) -> Result<()>;
}

/// Shared handle to the configured cache.
pub type SharedCache = Arc<dyn KeyValueCache>;

/// Build the cache selected by the configuration.
pub fn connect(config: &CacheConfig) -> Result<SharedCache> {
    match config.backend {
        CacheBackend::Memory => Ok(Arc::new(MemoryCache::new())),
        CacheBackend::Redis => Ok(Arc::new(RedisCache::connect(&config.url)?)),
    }
}
