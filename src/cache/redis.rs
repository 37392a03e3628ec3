//! Redis-backed key-value cache.

use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::redis::{self, AsyncCommands};
use deadpool_redis::{Config, Pool, Runtime};
use tracing::{debug, warn};

use super::KeyValueCache;
use crate::{DepotError, Result};

/// Cache talking to a Redis server through a connection pool.
#[derive(Clone)]
pub struct RedisCache {
    pool: Pool,
}

impl RedisCache {
    /// Create a pool for the given URL.
    ///
    /// No connection is opened until the first command.
    pub fn connect(url: &str) -> Result<Self> {
        debug!(url = %url, "Creating redis pool");
        let pool = Config::from_url(url)
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| DepotError::Cache(format!("could not create pool: {e}")))?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl KeyValueCache for RedisCache {
    async fn is_alive(&self) -> bool {
        let mut con = match self.pool.get().await {
            Ok(con) => con,
            Err(e) => {
                warn!(error = %e, "Redis connection unavailable");
                return false;
            }
        };
        redis::cmd("PING")
            .query_async::<_, String>(&mut con)
            .await
            .is_ok()
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut con = self.pool.get().await?;
        let value: Option<String> = con.get(key).await?;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut con = self.pool.get().await?;
        con.set_ex::<_, _, ()>(key, value, ttl.as_secs()).await?;
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<()> {
        let mut con = self.pool.get().await?;
        con.del::<_, ()>(key).await?;
        Ok(())
    }
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache").finish()
    }
}
