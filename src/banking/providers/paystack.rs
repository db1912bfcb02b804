use crate::banking::error::{BankServiceError, BankServiceResult};
use crate::banking::provider::BankRailClient;
use crate::banking::types::{BankProvider, UnifiedAccountDetails, UnifiedBank};
use crate::banking::utils::{build_url, BankHttpClient, RetryPolicy};
use crate::logging::mask_account_number;
use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

pub const PAYSTACK_BASE_URL: &str = "https://api.paystack.co";

#[derive(Debug, Clone)]
pub struct PaystackConfig {
    pub secret_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub retry: RetryPolicy,
}

impl Default for PaystackConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            base_url: PAYSTACK_BASE_URL.to_string(),
            timeout_secs: 30,
            retry: RetryPolicy::default(),
        }
    }
}

/// Paystack rail. The bank list is global; `country` is ignored.
pub struct PaystackBankService {
    config: PaystackConfig,
    http: BankHttpClient,
}

impl PaystackBankService {
    pub fn new(config: PaystackConfig) -> BankServiceResult<Self> {
        if config.secret_key.trim().is_empty() {
            return Err(BankServiceError::Configuration {
                message: "paystack secret key is required".to_string(),
                field: Some("secret_key".to_string()),
            });
        }
        let http = BankHttpClient::new(Duration::from_secs(config.timeout_secs), config.retry)?;
        Ok(Self { config, http })
    }

    fn rejected(message: String) -> BankServiceError {
        BankServiceError::ProviderRejected {
            provider: BankProvider::Paystack.to_string(),
            message,
        }
    }
}

#[async_trait]
impl BankRailClient for PaystackBankService {
    fn provider(&self) -> BankProvider {
        BankProvider::Paystack
    }

    async fn try_fetch_banks(
        &self,
        _country: Option<&str>,
    ) -> BankServiceResult<Vec<UnifiedBank>> {
        let url = build_url(&self.config.base_url, "/bank", &[])?;
        debug!("fetching paystack bank list");

        let raw: PaystackEnvelope<Vec<PaystackBank>> = self
            .http
            .request_json(Method::GET, url, &self.config.secret_key, None)
            .await
            .map_err(|e| e.for_provider("paystack"))?;

        if !raw.status {
            return Err(Self::rejected(raw.message));
        }

        let mut banks: Vec<UnifiedBank> = raw
            .data
            .unwrap_or_default()
            .into_iter()
            .filter(|bank| bank.active)
            .map(|bank| UnifiedBank {
                code: bank.code,
                name: bank.name,
                provider: BankProvider::Paystack,
            })
            .collect();
        banks.sort_by_cached_key(|bank| bank.name.to_lowercase());

        info!(count = banks.len(), "paystack banks fetched");
        Ok(banks)
    }

    async fn try_resolve_bank_account(
        &self,
        account_number: &str,
        bank_code: &str,
    ) -> BankServiceResult<UnifiedAccountDetails> {
        let url = build_url(
            &self.config.base_url,
            "/bank/resolve",
            &[("account_number", account_number), ("bank_code", bank_code)],
        )?;

        let raw: PaystackEnvelope<PaystackAccount> = self
            .http
            .request_json(Method::GET, url, &self.config.secret_key, None)
            .await
            .map_err(|e| e.for_provider("paystack"))?;

        if !raw.status {
            return Err(Self::rejected(raw.message));
        }

        let account = raw.data.ok_or(BankServiceError::MalformedResponse {
            provider: "paystack".to_string(),
            message: "missing data in account resolution response".to_string(),
        })?;
        let account_name = account
            .account_name
            .filter(|name| !name.trim().is_empty())
            .ok_or(BankServiceError::MalformedResponse {
                provider: "paystack".to_string(),
                message: "missing account_name in account resolution response".to_string(),
            })?;

        info!(
            account = %mask_account_number(account_number),
            bank_code = %bank_code,
            "paystack account resolved"
        );

        // Paystack does not echo the bank code back.
        Ok(UnifiedAccountDetails {
            account_number: account
                .account_number
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| account_number.to_string()),
            account_name,
            bank_code: bank_code.to_string(),
            provider: BankProvider::Paystack,
        })
    }
}

#[derive(Debug, Deserialize)]
struct PaystackEnvelope<T> {
    status: bool,
    #[serde(default)]
    message: String,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct PaystackBank {
    name: String,
    code: String,
    #[serde(default)]
    active: bool,
}

#[derive(Debug, Deserialize)]
struct PaystackAccount {
    #[serde(default)]
    account_number: Option<String>,
    #[serde(default)]
    account_name: Option<String>,
}
