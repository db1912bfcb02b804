use super::error::CacheResult;
use super::keys::banks::BankListKey;
use super::BankListCache;
use crate::banking::types::UnifiedBank;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone)]
struct CachedBanks {
    banks: Vec<UnifiedBank>,
    expires_at: Instant,
}

/// Process-local bank list cache with per-entry expiry.
#[derive(Debug, Default)]
pub struct MemoryBankListCache {
    entries: RwLock<HashMap<BankListKey, CachedBanks>>,
}

impl MemoryBankListCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl BankListCache for MemoryBankListCache {
    async fn get(&self, key: &BankListKey) -> CacheResult<Option<Vec<UnifiedBank>>> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Ok(Some(entry.banks.clone()))
                }
                Some(_) => {}
                None => return Ok(None),
            }
        }

        debug!(key = %key, "evicting expired bank list");
        let mut entries = self.entries.write().await;
        if entries
            .get(key)
            .is_some_and(|entry| entry.expires_at <= Instant::now())
        {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set(
        &self,
        key: &BankListKey,
        banks: &[UnifiedBank],
        ttl: Duration,
    ) -> CacheResult<()> {
        let entry = CachedBanks {
            banks: banks.to_vec(),
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key.clone(), entry);
        Ok(())
    }

    async fn invalidate(&self, key: &BankListKey) -> CacheResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
