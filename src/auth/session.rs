//! Session tokens for filedepot.
//!
//! A session is a single cache entry `auth_<token>` holding the user ID.
//! Expiry is left entirely to the cache.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::cache::SharedCache;
use crate::Result;

/// Session lifetime (24 hours).
pub const SESSION_DURATION_SECS: u64 = 24 * 60 * 60;

/// Prefix of every session key in the cache.
const KEY_PREFIX: &str = "auth_";

/// A freshly issued session token.
#[derive(Debug, Clone)]
pub struct SessionToken {
    /// Opaque token (UUID v4).
    pub token: String,
    /// User the token belongs to.
    pub user_id: i64,
    /// When the cache entry expires.
    pub expires_at: DateTime<Utc>,
}

/// Issues, resolves and revokes session tokens stored in the cache.
#[derive(Clone)]
pub struct SessionTokenManager {
    cache: SharedCache,
    duration: Duration,
}

impl SessionTokenManager {
    /// Create a manager with the default 24-hour lifetime.
    pub fn new(cache: SharedCache) -> Self {
        Self::with_duration(cache, Duration::from_secs(SESSION_DURATION_SECS))
    }

    /// Create a manager with a custom lifetime.
    pub fn with_duration(cache: SharedCache, duration: Duration) -> Self {
        Self { cache, duration }
    }

    fn key(token: &str) -> String {
        format!("{KEY_PREFIX}{token}")
    }

    /// Issue a new token for a user.
    pub async fn issue(&self, user_id: i64) -> Result<SessionToken> {
        let token = Uuid::new_v4().to_string();
        self.cache
            .set_ex(&Self::key(&token), &user_id.to_string(), self.duration)
            .await?;

        let expires_at =
            Utc::now() + chrono::Duration::from_std(self.duration).unwrap_or_default();
        info!(user_id, "Session issued");

        Ok(SessionToken {
            token,
            user_id,
            expires_at,
        })
    }

    /// Resolve a token to its user ID.
    ///
    /// Unknown, expired and corrupted entries all resolve to `None`.
    pub async fn resolve(&self, token: &str) -> Result<Option<i64>> {
        if token.is_empty() {
            return Ok(None);
        }

        let value = self.cache.get(&Self::key(token)).await?;
        Ok(value.and_then(|v| match v.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                debug!("Session entry does not hold a user id");
                None
            }
        }))
    }

    /// Delete a token. Revoking an unknown token is not an error.
    pub async fn revoke(&self, token: &str) -> Result<()> {
        self.cache.del(&Self::key(token)).await?;
        debug!("Session revoked");
        Ok(())
    }
}

impl std::fmt::Debug for SessionTokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenManager")
            .field("duration", &self.duration)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cache::{KeyValueCache, MemoryCache};

    fn manager() -> (Arc<MemoryCache>, SessionTokenManager) {
        let cache = Arc::new(MemoryCache::new());
        let manager = SessionTokenManager::new(cache.clone());
        (cache, manager)
    }

    #[tokio::test]
    async fn test_issue_and_resolve() {
        let (cache, manager) = manager();

        let session = manager.issue(42).await.unwrap();
        assert_eq!(session.user_id, 42);
        assert!(Uuid::parse_str(&session.token).is_ok());
        assert!(session.expires_at > Utc::now());

        let stored = cache.get(&format!("auth_{}", session.token)).await.unwrap();
        assert_eq!(stored, Some("42".to_string()));

        assert_eq!(manager.resolve(&session.token).await.unwrap(), Some(42));
    }

    #[tokio::test]
    async fn test_tokens_are_unique() {
        let (_, manager) = manager();
        let a = manager.issue(1).await.unwrap();
        let b = manager.issue(1).await.unwrap();
        assert_ne!(a.token, b.token);
    }

    #[tokio::test]
    async fn test_resolve_unknown_token() {
        let (_, manager) = manager();
        assert_eq!(manager.resolve("not-a-token").await.unwrap(), None);
        assert_eq!(manager.resolve("").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_revoke() {
        let (_, manager) = manager();
        let session = manager.issue(7).await.unwrap();

        manager.revoke(&session.token).await.unwrap();
        assert_eq!(manager.resolve(&session.token).await.unwrap(), None);

        // Second revoke is a no-op.
        assert!(manager.revoke(&session.token).await.is_ok());
    }

    #[tokio::test]
    async fn test_corrupted_entry_resolves_to_none() {
        let (cache, manager) = manager();
        cache
            .set_ex("auth_bad", "not-a-number", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(manager.resolve("bad").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_expires_after_24_hours() {
        let (_, manager) = manager();
        let session = manager.issue(3).await.unwrap();

        tokio::time::advance(Duration::from_secs(SESSION_DURATION_SECS - 1)).await;
        assert_eq!(manager.resolve(&session.token).await.unwrap(), Some(3));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(manager.resolve(&session.token).await.unwrap(), None);
    }
}
