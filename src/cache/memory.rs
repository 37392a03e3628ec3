//! In-process key-value cache with per-entry expiry.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use super::KeyValueCache;
use crate::Result;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Cache backed by a map guarded by an async `RwLock`.
///
/// Expired entries are invisible to readers and are swept on writes.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| !e.is_expired(now))
            .count()
    }

    /// Whether the cache holds no live entries.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Remove every entry.
    pub async fn flush(&self) {
        self.entries.write().await.clear();
    }
}

#[async_trait]
impl KeyValueCache for MemoryCache {
    async fn is_alive(&self) -> bool {
        true
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|e| !e.is_expired(now))
            .map(|e| e.value.clone()))
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        let before = entries.len();
        entries.retain(|_, e| !e.is_expired(now));
        if entries.len() < before {
            debug!(swept = before - entries.len(), "Swept expired cache entries");
        }

        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: now + ttl,
            },
        );
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = MemoryCache::new();
        cache
            .set_ex("k", "v", Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(cache.get("k").await.unwrap(), Some("v".to_string()));
        assert_eq!(cache.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_overwrite_replaces_value() {
        let cache = MemoryCache::new();
        cache.set_ex("k", "a", Duration::from_secs(60)).await.unwrap();
        cache.set_ex("k", "b", Duration::from_secs(60)).await.unwrap();

        assert_eq!(cache.get("k").await.unwrap(), Some("b".to_string()));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_del_missing_key_is_ok() {
        let cache = MemoryCache::new();
        assert!(cache.del("nothing").await.is_ok());
    }

    #[tokio::test]
    async fn test_del_removes_key() {
        let cache = MemoryCache::new();
        cache.set_ex("k", "v", Duration::from_secs(60)).await.unwrap();
        cache.del("k").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let cache = MemoryCache::new();
        cache.set_ex("k", "v", Duration::from_secs(10)).await.unwrap();

        tokio::time::advance(Duration::from_secs(9)).await;
        assert_eq!(cache.get("k").await.unwrap(), Some("v".to_string()));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get("k").await.unwrap(), None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entries_swept_on_write() {
        let cache = MemoryCache::new();
        cache.set_ex("old", "v", Duration::from_secs(1)).await.unwrap();
        tokio::time::advance(Duration::from_secs(2)).await;
        cache.set_ex("new", "v", Duration::from_secs(60)).await.unwrap();

        assert_eq!(cache.entries.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_flush() {
        let cache = MemoryCache::new();
        cache.set_ex("a", "1", Duration::from_secs(60)).await.unwrap();
        cache.set_ex("b", "2", Duration::from_secs(60)).await.unwrap();
        cache.flush().await;
        assert!(cache.is_empty().await);
    }
}
