//! Redis-backed bank list cache shared across gateway instances

use super::error::{CacheError, CacheResult};
use super::keys::banks::BankListKey;
use super::BankListCache;
use crate::banking::types::UnifiedBank;
use async_trait::async_trait;
use bb8::Pool;
use bb8_redis::RedisConnectionManager;
use std::time::Duration;
use tracing::{error, info, warn};

/// Redis connection pool type alias
pub type RedisPool = Pool<RedisConnectionManager>;

/// Redis cache configuration
#[derive(Debug, Clone)]
pub struct RedisCacheConfig {
    /// Redis connection URL
    pub redis_url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum idle connections
    pub min_idle: u32,
    /// Connection timeout
    pub connection_timeout: Duration,
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".to_string(),
            max_connections: 10,
            min_idle: 1,
            connection_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Clone)]
pub struct RedisBankListCache {
    pool: RedisPool,
}

impl RedisBankListCache {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Builds the pool. An unreachable server is logged but not fatal; calls
    /// degrade to cache misses until Redis comes back.
    pub async fn connect(config: RedisCacheConfig) -> CacheResult<Self> {
        info!(
            max_connections = config.max_connections,
            "Initializing Redis bank list cache"
        );

        let manager = RedisConnectionManager::new(config.redis_url.as_str()).map_err(|e| {
            error!("Failed to create Redis connection manager: {}", e);
            CacheError::ConnectionError(e.to_string())
        })?;

        let pool = Pool::builder()
            .max_size(config.max_connections)
            .min_idle(Some(config.min_idle))
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|e| {
                error!("Failed to build Redis connection pool: {}", e);
                CacheError::ConnectionError(e.to_string())
            })?;

        let cache = Self::new(pool);
        if let Err(e) = cache.ping().await {
            warn!("Initial Redis connection test failed, but continuing: {}", e);
        }
        Ok(cache)
    }

    pub async fn ping(&self) -> CacheResult<()> {
        let mut conn = self.pool.get().await?;
        let _: String = redis::cmd("PING").query_async(&mut *conn).await?;
        Ok(())
    }
}

#[async_trait]
impl BankListCache for RedisBankListCache {
    async fn get(&self, key: &BankListKey) -> CacheResult<Option<Vec<UnifiedBank>>> {
        let mut conn = self.pool.get().await?;
        let raw: Option<String> = redis::cmd("GET")
            .arg(key.to_string())
            .query_async(&mut *conn)
            .await?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        key: &BankListKey,
        banks: &[UnifiedBank],
        ttl: Duration,
    ) -> CacheResult<()> {
        let payload = serde_json::to_string(banks)?;
        let mut conn = self.pool.get().await?;
        let _: () = redis::cmd("SET")
            .arg(key.to_string())
            .arg(payload)
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .query_async(&mut *conn)
            .await?;
        Ok(())
    }

    async fn invalidate(&self, key: &BankListKey) -> CacheResult<()> {
        let mut conn = self.pool.get().await?;
        let _: i64 = redis::cmd("DEL")
            .arg(key.to_string())
            .query_async(&mut *conn)
            .await?;
        Ok(())
    }
}
