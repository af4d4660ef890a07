//! Redis-backed store for short-lived pending state.

use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};

use common::{AppError, AppResult, CacheConfig};
use domain::MSG_SET_RESOURCE;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Key/value store with per-key expiry.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PendingStore: Send + Sync {
    /// Store `value` under `key`, overwriting any previous value; it expires after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;
}

/// Redis cache wrapper with connection pooling.
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    pub async fn connect(config: &CacheConfig) -> Result<Self, RedisError> {
        let client = Client::open(config.url.as_str())?;
        let connection = ConnectionManager::new(client).await?;
        tracing::info!("Redis cache connected");
        Ok(Self { connection })
    }

    /// Connection manager for other Redis users (stream publishers).
    pub fn connection(&self) -> ConnectionManager {
        self.connection.clone()
    }

    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

#[async_trait]
impl PendingStore for RedisCache {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let mut conn = self.connection.clone();
        // SETEX rejects a zero expiry
        let seconds = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, seconds)
            .await
            .map_err(|e| {
                tracing::error!(key, error = %e, "Failed to write pending value");
                AppError::internal(MSG_SET_RESOURCE)
            })
    }
}
