//! Bank list caching
//!
//! Bank lists change rarely, so the gateway keeps them per provider+country
//! for a configurable TTL. Two backends are provided:
//! - `MemoryBankListCache`: process-local, the gateway default
//! - `RedisBankListCache`: shared across instances (`cache` feature)
//!
//! Cache failures never fail a gateway call; they are logged and treated as
//! a miss.

pub mod error;
pub mod keys;
pub mod memory;
#[cfg(feature = "cache")]
pub mod redis_cache;

use crate::banking::types::UnifiedBank;
use async_trait::async_trait;
use std::time::Duration;

pub use error::{CacheError, CacheResult};
pub use keys::banks::BankListKey;
pub use memory::MemoryBankListCache;
#[cfg(feature = "cache")]
pub use redis_cache::{RedisBankListCache, RedisCacheConfig};

#[async_trait]
pub trait BankListCache: Send + Sync {
    /// Returns the cached list, or `None` when absent or expired.
    async fn get(&self, key: &BankListKey) -> CacheResult<Option<Vec<UnifiedBank>>>;

    async fn set(
        &self,
        key: &BankListKey,
        banks: &[UnifiedBank],
        ttl: Duration,
    ) -> CacheResult<()>;

    async fn invalidate(&self, key: &BankListKey) -> CacheResult<()>;
}
