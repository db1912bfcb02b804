use crate::banking::error::BankServiceError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BankProvider {
    Paystack,
    Flutterwave,
}

impl BankProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            BankProvider::Paystack => "paystack",
            BankProvider::Flutterwave => "flutterwave",
        }
    }

    /// Whether the provider scopes its bank list by country.
    pub fn is_country_scoped(&self) -> bool {
        matches!(self, BankProvider::Flutterwave)
    }
}

impl std::fmt::Display for BankProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BankProvider {
    type Err = BankServiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "paystack" => Ok(BankProvider::Paystack),
            "flutterwave" => Ok(BankProvider::Flutterwave),
            _ => Err(BankServiceError::UnsupportedProvider {
                provider: value.to_string(),
            }),
        }
    }
}

/// A bank as known to one rail. `code` is only meaningful to `provider`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnifiedBank {
    pub code: String,
    pub name: String,
    pub provider: BankProvider,
}

/// Result of a successful account resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnifiedAccountDetails {
    pub account_number: String,
    pub account_name: String,
    pub bank_code: String,
    pub provider: BankProvider,
}
