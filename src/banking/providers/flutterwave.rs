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

pub const FLUTTERWAVE_BASE_URL: &str = "https://api.flutterwave.com/v3";
pub const DEFAULT_COUNTRY: &str = "NG";

#[derive(Debug, Clone)]
pub struct FlutterwaveConfig {
    pub secret_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub retry: RetryPolicy,
}

impl Default for FlutterwaveConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            base_url: FLUTTERWAVE_BASE_URL.to_string(),
            timeout_secs: 30,
            retry: RetryPolicy::default(),
        }
    }
}

pub struct FlutterwaveBankService {
    config: FlutterwaveConfig,
    http: BankHttpClient,
}

impl FlutterwaveBankService {
    pub fn new(config: FlutterwaveConfig) -> BankServiceResult<Self> {
        if config.secret_key.trim().is_empty() {
            return Err(BankServiceError::Configuration {
                message: "flutterwave secret key is required".to_string(),
                field: Some("secret_key".to_string()),
            });
        }
        let http = BankHttpClient::new(Duration::from_secs(config.timeout_secs), config.retry)?;
        Ok(Self { config, http })
    }

    /// Upper-cased ISO country code, `NG` when absent or blank.
    pub fn normalize_country(country: Option<&str>) -> String {
        country
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_uppercase)
            .unwrap_or_else(|| DEFAULT_COUNTRY.to_string())
    }

    fn ensure_success<T>(raw: FlutterwaveEnvelope<T>) -> BankServiceResult<Option<T>> {
        if raw.status.to_lowercase() != "success" {
            return Err(BankServiceError::ProviderRejected {
                provider: BankProvider::Flutterwave.to_string(),
                message: raw.message,
            });
        }
        Ok(raw.data)
    }
}

#[async_trait]
impl BankRailClient for FlutterwaveBankService {
    fn provider(&self) -> BankProvider {
        BankProvider::Flutterwave
    }

    async fn try_fetch_banks(
        &self,
        country: Option<&str>,
    ) -> BankServiceResult<Vec<UnifiedBank>> {
        let country = Self::normalize_country(country);
        let url = build_url(
            &self.config.base_url,
            &format!("/banks/{}", country),
            &[("include_provider_type", "1")],
        )?;
        debug!(country = %country, "fetching flutterwave bank list");

        let raw: FlutterwaveEnvelope<Vec<FlutterwaveBank>> = self
            .http
            .request_json(Method::GET, url, &self.config.secret_key, None)
            .await
            .map_err(|e| e.for_provider("flutterwave"))?;

        // Upstream order is preserved; Flutterwave lists are not filtered.
        let banks: Vec<UnifiedBank> = Self::ensure_success(raw)?
            .unwrap_or_default()
            .into_iter()
            .map(|bank| UnifiedBank {
                code: bank.code,
                name: bank.name,
                provider: BankProvider::Flutterwave,
            })
            .collect();

        info!(country = %country, count = banks.len(), "flutterwave banks fetched");
        Ok(banks)
    }

    async fn try_resolve_bank_account(
        &self,
        account_number: &str,
        bank_code: &str,
    ) -> BankServiceResult<UnifiedAccountDetails> {
        let url = build_url(&self.config.base_url, "/accounts/resolve", &[])?;
        let payload = serde_json::json!({
            "account_number": account_number,
            "account_bank": bank_code,
        });

        let raw: FlutterwaveEnvelope<FlutterwaveAccount> = self
            .http
            .request_json(Method::POST, url, &self.config.secret_key, Some(&payload))
            .await
            .map_err(|e| e.for_provider("flutterwave"))?;

        let account = Self::ensure_success(raw)?.ok_or(BankServiceError::MalformedResponse {
            provider: "flutterwave".to_string(),
            message: "missing data in account resolution response".to_string(),
        })?;
        let account_name = account
            .account_name
            .filter(|name| !name.trim().is_empty())
            .ok_or(BankServiceError::MalformedResponse {
                provider: "flutterwave".to_string(),
                message: "missing account_name in account resolution response".to_string(),
            })?;

        info!(
            account = %mask_account_number(account_number),
            bank_code = %bank_code,
            "flutterwave account resolved"
        );

        Ok(UnifiedAccountDetails {
            account_number: account
                .account_number
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| account_number.to_string()),
            account_name,
            bank_code: account
                .account_bank
                .filter(|code| !code.is_empty())
                .unwrap_or_else(|| bank_code.to_string()),
            provider: BankProvider::Flutterwave,
        })
    }
}

#[derive(Debug, Deserialize)]
struct FlutterwaveEnvelope<T> {
    status: String,
    #[serde(default)]
    message: String,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct FlutterwaveBank {
    code: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct FlutterwaveAccount {
    #[serde(default)]
    account_number: Option<String>,
    #[serde(default)]
    account_name: Option<String>,
    #[serde(default)]
    account_bank: Option<String>,
}
