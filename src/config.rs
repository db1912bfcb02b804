//! Gateway configuration
//! Holds the provider selection, credentials and transport tuning for a gateway instance

use crate::banking::providers::flutterwave::{FlutterwaveConfig, FLUTTERWAVE_BASE_URL};
use crate::banking::providers::paystack::{PaystackConfig, PAYSTACK_BASE_URL};
use crate::banking::types::BankProvider;
use crate::banking::utils::RetryPolicy;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Configuration for one `UnifiedBankService`.
///
/// Fixed for the lifetime of the gateway; switching provider or credentials
/// means building a new gateway.
#[derive(Debug, Clone)]
pub struct BankServiceConfig {
    pub provider: BankProvider,
    pub secret_key: String,
    /// Only used by rails that scope bank lists by country (Flutterwave).
    pub country: Option<String>,
    /// Overrides the provider's public API base URL.
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    /// Bank list cache lifetime. Zero disables caching.
    pub bank_list_ttl_secs: u64,
    /// Reject Nigerian account/bank code pairs that fail the NUBAN check
    /// before calling the provider.
    pub validate_nuban: bool,
}

impl BankServiceConfig {
    pub fn new(provider: BankProvider, secret_key: impl Into<String>) -> Self {
        Self {
            provider,
            secret_key: secret_key.into(),
            country: None,
            base_url: None,
            timeout_secs: 30,
            max_retries: 2,
            retry_backoff_ms: 500,
            bank_list_ttl_secs: 3600,
            validate_nuban: false,
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_retries(mut self, max_retries: u32, backoff_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.retry_backoff_ms = backoff_ms;
        self
    }

    pub fn with_bank_list_ttl_secs(mut self, ttl_secs: u64) -> Self {
        self.bank_list_ttl_secs = ttl_secs;
        self
    }

    pub fn with_nuban_validation(mut self, enabled: bool) -> Self {
        self.validate_nuban = enabled;
        self
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        let _ = dotenv::dotenv().ok();

        let provider_raw = env::var("BANK_PROVIDER").unwrap_or_else(|_| "paystack".to_string());
        let provider = BankProvider::from_str(&provider_raw)
            .map_err(|_| ConfigError::InvalidValue(format!("BANK_PROVIDER={}", provider_raw)))?;

        let provider_key_var = match provider {
            BankProvider::Paystack => "PAYSTACK_SECRET_KEY",
            BankProvider::Flutterwave => "FLUTTERWAVE_SECRET_KEY",
        };
        let secret_key = env::var("BANK_SECRET_KEY")
            .or_else(|_| env::var(provider_key_var))
            .map_err(|_| ConfigError::MissingVariable("BANK_SECRET_KEY".to_string()))?;

        let defaults = Self::new(provider, secret_key);
        let config = Self {
            country: env::var("BANK_COUNTRY").ok().filter(|c| !c.trim().is_empty()),
            base_url: env::var("BANK_BASE_URL").ok().filter(|u| !u.trim().is_empty()),
            timeout_secs: parse_var("BANK_TIMEOUT_SECS", defaults.timeout_secs)?,
            max_retries: parse_var("BANK_MAX_RETRIES", defaults.max_retries)?,
            retry_backoff_ms: parse_var("BANK_RETRY_BACKOFF_MS", defaults.retry_backoff_ms)?,
            bank_list_ttl_secs: parse_var("BANK_LIST_TTL_SECS", defaults.bank_list_ttl_secs)?,
            validate_nuban: parse_var("BANK_VALIDATE_NUBAN", defaults.validate_nuban)?,
            ..defaults
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret_key.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "secret key cannot be empty".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if let Some(country) = &self.country {
            let country = country.trim();
            if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(ConfigError::InvalidValue(format!(
                    "country must be a two-letter ISO code, got {}",
                    country
                )));
            }
        }

        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            backoff: Duration::from_millis(self.retry_backoff_ms),
        }
    }

    pub fn bank_list_ttl(&self) -> Option<Duration> {
        match self.bank_list_ttl_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn paystack_config(&self) -> PaystackConfig {
        PaystackConfig {
            secret_key: self.secret_key.clone(),
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| PAYSTACK_BASE_URL.to_string()),
            timeout_secs: self.timeout_secs,
            retry: self.retry_policy(),
        }
    }

    pub fn flutterwave_config(&self) -> FlutterwaveConfig {
        FlutterwaveConfig {
            secret_key: self.secret_key.clone(),
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| FLUTTERWAVE_BASE_URL.to_string()),
            timeout_secs: self.timeout_secs,
            retry: self.retry_policy(),
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        Err(_) => Ok(default),
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVariable(String),

    #[error("Invalid value for configuration: {0}")]
    InvalidValue(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}
