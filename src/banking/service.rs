//! Unified bank service
//!
//! Single entry point used by payout and transfer flows to list banks and to
//! confirm a destination account before money moves. The configured provider
//! is fixed per instance; calls are routed to the rail registered for it.
//!
//! Failure policy:
//! - configuration errors (no rail registered for the provider) are returned
//!   as `Err` from every operation
//! - upstream failures degrade to an empty list or `None`

use crate::banking::error::{BankServiceError, BankServiceResult};
use crate::banking::provider::BankRailClient;
use crate::banking::providers::flutterwave::{FlutterwaveBankService, DEFAULT_COUNTRY};
use crate::banking::registry::RailRegistry;
use crate::banking::types::{BankProvider, UnifiedAccountDetails, UnifiedBank};
use crate::cache::{BankListCache, BankListKey, MemoryBankListCache};
use crate::config::BankServiceConfig;
use crate::logging::mask_account_number;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct UnifiedBankService {
    config: BankServiceConfig,
    registry: RailRegistry,
    cache: Arc<dyn BankListCache>,
}

impl UnifiedBankService {
    /// Builds a gateway with only the selected rail and an in-memory bank list
    /// cache.
    pub fn new(config: BankServiceConfig) -> BankServiceResult<Self> {
        config
            .validate()
            .map_err(|e| BankServiceError::Configuration {
                message: e.to_string(),
                field: None,
            })?;
        let registry = RailRegistry::from_config(&config)?;
        Ok(Self::with_registry(config, registry))
    }

    /// Builds a gateway over caller-supplied rails, e.g. clients holding
    /// distinct credentials. The registry is not checked here; a missing rail
    /// surfaces as `UnsupportedProvider` on the first call.
    pub fn with_registry(config: BankServiceConfig, registry: RailRegistry) -> Self {
        Self {
            config,
            registry,
            cache: Arc::new(MemoryBankListCache::new()),
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn BankListCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn provider(&self) -> BankProvider {
        self.config.provider
    }

    pub fn config(&self) -> &BankServiceConfig {
        &self.config
    }

    fn rail(&self) -> BankServiceResult<Arc<dyn BankRailClient>> {
        self.registry.get(self.config.provider)
    }

    /// NUBAN only applies to Nigerian accounts: always for Paystack, and for
    /// country-scoped rails when the configured country is `NG`.
    fn nuban_applies(&self) -> bool {
        !self.config.provider.is_country_scoped()
            || FlutterwaveBankService::normalize_country(self.config.country.as_deref())
                == DEFAULT_COUNTRY
    }

    fn cache_key(&self) -> BankListKey {
        BankListKey::new(self.config.provider, self.config.country.as_deref())
    }

    /// Lists banks for the configured provider (and country, where the rail is
    /// country scoped).
    pub async fn fetch_banks(&self) -> BankServiceResult<Vec<UnifiedBank>> {
        let rail = self.rail()?;
        let key = self.cache_key();
        let ttl = self.config.bank_list_ttl();

        if ttl.is_some() {
            match self.cache.get(&key).await {
                Ok(Some(banks)) => {
                    debug!(key = %key, count = banks.len(), "bank list served from cache");
                    return Ok(banks);
                }
                Ok(None) => {}
                Err(e) => warn!(key = %key, error = %e, "bank list cache read failed"),
            }
        }

        let banks = rail.fetch_banks(self.config.country.as_deref()).await;

        // Empty lists are what failures degrade to, so they are never cached.
        if let Some(ttl) = ttl.filter(|_| !banks.is_empty()) {
            if let Err(e) = self.cache.set(&key, &banks, ttl).await {
                warn!(key = %key, error = %e, "bank list cache write failed");
            }
        }

        Ok(banks)
    }

    /// Resolves the registered account name. `bank_code` must come from this
    /// gateway's own `fetch_banks`.
    pub async fn resolve_bank_account(
        &self,
        account_number: &str,
        bank_code: &str,
    ) -> BankServiceResult<Option<UnifiedAccountDetails>> {
        let rail = self.rail()?;

        if self.config.validate_nuban && self.nuban_applies() {
            if let Err(e) = check_nuban(account_number, bank_code) {
                warn!(
                    account = %mask_account_number(account_number),
                    bank_code = %bank_code,
                    error = %e,
                    "account failed local NUBAN check"
                );
                return Ok(None);
            }
        }

        let details = rail.resolve_bank_account(account_number, bank_code).await;
        if details.is_some() {
            info!(
                provider = %self.config.provider,
                account = %mask_account_number(account_number),
                "bank account resolved"
            );
        }
        Ok(details)
    }

    /// Drops the cached bank list for this gateway's provider and country.
    pub async fn invalidate_bank_cache(&self) {
        let key = self.cache_key();
        if let Err(e) = self.cache.invalidate(&key).await {
            warn!(key = %key, error = %e, "bank list cache invalidation failed");
        }
    }
}

/// Validates the NUBAN check digit for a 10-digit account at a 3-digit bank
/// code. Other shapes are left to the provider.
pub fn check_nuban(account_number: &str, bank_code: &str) -> BankServiceResult<()> {
    let is_nuban_shape = account_number.len() == 10
        && account_number.chars().all(|c| c.is_ascii_digit())
        && bank_code.len() == 3
        && bank_code.chars().all(|c| c.is_ascii_digit());
    if !is_nuban_shape {
        return Ok(());
    }

    nuban::Nuban::new(bank_code, account_number)
        .map(|_| ())
        .map_err(|_| BankServiceError::InvalidAccount {
            message: "Invalid NUBAN account number".to_string(),
        })
}
