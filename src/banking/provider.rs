use crate::banking::error::BankServiceResult;
use crate::banking::types::{BankProvider, UnifiedAccountDetails, UnifiedBank};
use crate::logging::mask_account_number;
use async_trait::async_trait;
use tracing::warn;

/// One banking rail behind the unified gateway.
///
/// Implementors supply the strict `try_*` operations. The degrading
/// `fetch_banks` / `resolve_bank_account` wrappers fold every upstream failure
/// into an empty list or `None`, logging the cause.
#[async_trait]
pub trait BankRailClient: Send + Sync {
    fn provider(&self) -> BankProvider;

    /// Lists banks on this rail. `country` is ignored by rails whose list is
    /// not country scoped.
    async fn try_fetch_banks(&self, country: Option<&str>)
        -> BankServiceResult<Vec<UnifiedBank>>;

    /// Looks up the registered name for `account_number` at `bank_code`.
    /// `bank_code` must come from this same rail's bank list.
    async fn try_resolve_bank_account(
        &self,
        account_number: &str,
        bank_code: &str,
    ) -> BankServiceResult<UnifiedAccountDetails>;

    async fn fetch_banks(&self, country: Option<&str>) -> Vec<UnifiedBank> {
        match self.try_fetch_banks(country).await {
            Ok(banks) => banks,
            Err(e) => {
                warn!(
                    provider = %self.provider(),
                    error = %e,
                    retryable = e.is_retryable(),
                    "failed to fetch banks, returning empty list"
                );
                Vec::new()
            }
        }
    }

    async fn resolve_bank_account(
        &self,
        account_number: &str,
        bank_code: &str,
    ) -> Option<UnifiedAccountDetails> {
        match self.try_resolve_bank_account(account_number, bank_code).await {
            Ok(details) => Some(details),
            Err(e) => {
                warn!(
                    provider = %self.provider(),
                    account = %mask_account_number(account_number),
                    bank_code = %bank_code,
                    error = %e,
                    "failed to resolve bank account"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banking::error::BankServiceError;

    struct FlakyRail {
        fail: bool,
    }

    #[async_trait]
    impl BankRailClient for FlakyRail {
        fn provider(&self) -> BankProvider {
            BankProvider::Paystack
        }

        async fn try_fetch_banks(
            &self,
            _country: Option<&str>,
        ) -> BankServiceResult<Vec<UnifiedBank>> {
            if self.fail {
                return Err(BankServiceError::Network {
                    message: "connection refused".to_string(),
                });
            }
            Ok(vec![UnifiedBank {
                code: "058".to_string(),
                name: "Guaranty Trust Bank".to_string(),
                provider: BankProvider::Paystack,
            }])
        }

        async fn try_resolve_bank_account(
            &self,
            account_number: &str,
            bank_code: &str,
        ) -> BankServiceResult<UnifiedAccountDetails> {
            if self.fail {
                return Err(BankServiceError::Upstream {
                    provider: "paystack".to_string(),
                    status: 422,
                    message: "Could not resolve account name".to_string(),
                    retryable: false,
                });
            }
            Ok(UnifiedAccountDetails {
                account_number: account_number.to_string(),
                account_name: "JANE DOE".to_string(),
                bank_code: bank_code.to_string(),
                provider: BankProvider::Paystack,
            })
        }
    }

    #[tokio::test]
    async fn degrading_wrappers_swallow_upstream_failures() {
        let rail: Box<dyn BankRailClient> = Box::new(FlakyRail { fail: true });
        assert!(rail.fetch_banks(None).await.is_empty());
        assert!(rail
            .resolve_bank_account("0123456789", "058")
            .await
            .is_none());
    }

    #[tokio::test]
    async fn degrading_wrappers_pass_through_success() {
        let rail: Box<dyn BankRailClient> = Box::new(FlakyRail { fail: false });
        assert_eq!(rail.fetch_banks(Some("NG")).await.len(), 1);
        let details = rail
            .resolve_bank_account("0123456789", "058")
            .await
            .expect("account should resolve");
        assert_eq!(details.account_name, "JANE DOE");
        assert_eq!(details.bank_code, "058");
    }
}
