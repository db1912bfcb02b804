//! Type-safe cache key builders

use std::fmt;

pub const VERSION: &str = "v1";

pub mod banks {
    use super::*;
    use crate::banking::providers::flutterwave::FlutterwaveBankService;
    use crate::banking::types::BankProvider;

    pub const NAMESPACE: &str = "banks";
    pub const GLOBAL_SCOPE: &str = "GLOBAL";

    /// Bank list for one provider, scoped by country when the provider is.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct BankListKey {
        pub provider: BankProvider,
        pub country: Option<String>,
    }

    impl BankListKey {
        pub fn new(provider: BankProvider, country: Option<&str>) -> Self {
            // Matches the country segment of the Flutterwave request path.
            let country = provider
                .is_country_scoped()
                .then(|| FlutterwaveBankService::normalize_country(country));
            Self { provider, country }
        }
    }

    impl fmt::Display for BankListKey {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(
                f,
                "{}:{}:{}:{}",
                VERSION,
                NAMESPACE,
                self.provider,
                self.country.as_deref().unwrap_or(GLOBAL_SCOPE)
            )
        }
    }
}
