//! Bank rail integration
//!
//! Lists banks and resolves account holder names across Paystack and
//! Flutterwave behind one canonical contract.

pub mod error;
pub mod provider;
pub mod providers;
pub mod registry;
pub mod service;
pub mod types;
pub mod utils;

pub use error::{BankServiceError, BankServiceResult};
pub use provider::BankRailClient;
pub use registry::RailRegistry;
pub use service::UnifiedBankService;
pub use types::{BankProvider, UnifiedAccountDetails, UnifiedBank};
