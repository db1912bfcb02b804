use crate::banking::error::{BankServiceError, BankServiceResult};
use crate::banking::provider::BankRailClient;
use crate::banking::providers::{FlutterwaveBankService, PaystackBankService};
use crate::banking::types::BankProvider;
use crate::config::BankServiceConfig;
use std::collections::HashMap;
use std::sync::Arc;

/// Rail clients keyed by provider tag.
#[derive(Clone, Default)]
pub struct RailRegistry {
    clients: HashMap<BankProvider, Arc<dyn BankRailClient>>,
}

impl RailRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry holding only the client for `config.provider`.
    pub fn from_config(config: &BankServiceConfig) -> BankServiceResult<Self> {
        let client: Arc<dyn BankRailClient> = match config.provider {
            BankProvider::Paystack => {
                Arc::new(PaystackBankService::new(config.paystack_config())?)
            }
            BankProvider::Flutterwave => {
                Arc::new(FlutterwaveBankService::new(config.flutterwave_config())?)
            }
        };
        Ok(Self::new().with_client(client))
    }

    /// Registers `client` under its own provider tag, replacing any previous one.
    pub fn register(&mut self, client: Arc<dyn BankRailClient>) {
        self.clients.insert(client.provider(), client);
    }

    pub fn with_client(mut self, client: Arc<dyn BankRailClient>) -> Self {
        self.register(client);
        self
    }

    pub fn get(&self, provider: BankProvider) -> BankServiceResult<Arc<dyn BankRailClient>> {
        self.clients
            .get(&provider)
            .cloned()
            .ok_or(BankServiceError::UnsupportedProvider {
                provider: provider.to_string(),
            })
    }

    pub fn providers(&self) -> Vec<BankProvider> {
        let mut providers: Vec<BankProvider> = self.clients.keys().copied().collect();
        providers.sort_by_key(|p| p.as_str());
        providers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_registers_only_selected_rail() {
        let config = BankServiceConfig::new(BankProvider::Flutterwave, "FLWSECK_TEST");
        let registry = RailRegistry::from_config(&config).expect("registry should build");
        assert_eq!(registry.providers(), vec![BankProvider::Flutterwave]);
        assert!(registry.get(BankProvider::Flutterwave).is_ok());

        let err = registry
            .get(BankProvider::Paystack)
            .err()
            .expect("paystack was never registered");
        assert!(err.is_configuration_error());
    }

    #[test]
    fn from_config_rejects_empty_secret() {
        let config = BankServiceConfig::new(BankProvider::Paystack, "");
        assert!(matches!(
            RailRegistry::from_config(&config),
            Err(BankServiceError::Configuration { .. })
        ));
    }

    #[test]
    fn distinct_credentials_per_rail() {
        let paystack = BankServiceConfig::new(BankProvider::Paystack, "sk_test_paystack");
        let flutterwave = BankServiceConfig::new(BankProvider::Flutterwave, "FLWSECK_TEST_other");
        let registry = RailRegistry::new()
            .with_client(Arc::new(
                PaystackBankService::new(paystack.paystack_config()).expect("paystack client"),
            ))
            .with_client(Arc::new(
                FlutterwaveBankService::new(flutterwave.flutterwave_config())
                    .expect("flutterwave client"),
            ));
        assert_eq!(
            registry.providers(),
            vec![BankProvider::Flutterwave, BankProvider::Paystack]
        );
    }
}
