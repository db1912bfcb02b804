//! Unified payment-rail provider gateway
//!
//! Abstracts over third-party banking APIs to list banks and resolve account
//! holder names through a single provider-agnostic interface.

pub mod banking;
pub mod cache;
pub mod config;
pub mod logging;

pub use banking::{
    BankProvider, BankRailClient, BankServiceError, BankServiceResult, RailRegistry,
    UnifiedAccountDetails, UnifiedBank, UnifiedBankService,
};
pub use config::{BankServiceConfig, ConfigError};
