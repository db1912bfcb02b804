use thiserror::Error;

pub type BankServiceResult<T> = Result<T, BankServiceError>;

#[derive(Debug, Clone, Error)]
pub enum BankServiceError {
    #[error("Unsupported bank provider: {provider}")]
    UnsupportedProvider { provider: String },

    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        field: Option<String>,
    },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Rate limit exceeded: {message}")]
    RateLimited { message: String },

    #[error("Upstream error: provider={provider}, status={status}, message={message}")]
    Upstream {
        provider: String,
        status: u16,
        message: String,
        retryable: bool,
    },

    #[error("Provider rejected request: provider={provider}, message={message}")]
    ProviderRejected { provider: String, message: String },

    #[error("Malformed provider response: provider={provider}, message={message}")]
    MalformedResponse { provider: String, message: String },

    #[error("Invalid account: {message}")]
    InvalidAccount { message: String },
}

impl BankServiceError {
    pub fn is_retryable(&self) -> bool {
        match self {
            BankServiceError::UnsupportedProvider { .. } => false,
            BankServiceError::Configuration { .. } => false,
            BankServiceError::Network { .. } => true,
            BankServiceError::RateLimited { .. } => true,
            BankServiceError::Upstream { retryable, .. } => *retryable,
            BankServiceError::ProviderRejected { .. } => false,
            BankServiceError::MalformedResponse { .. } => false,
            BankServiceError::InvalidAccount { .. } => false,
        }
    }

    /// Programmer errors that must surface to the caller instead of degrading
    /// to an empty result.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            BankServiceError::UnsupportedProvider { .. } | BankServiceError::Configuration { .. }
        )
    }

    /// Stamps the owning provider onto errors raised by the shared HTTP layer.
    pub(crate) fn for_provider(self, provider: &str) -> Self {
        match self {
            BankServiceError::Upstream {
                status,
                message,
                retryable,
                ..
            } => BankServiceError::Upstream {
                provider: provider.to_string(),
                status,
                message,
                retryable,
            },
            BankServiceError::MalformedResponse { message, .. } => {
                BankServiceError::MalformedResponse {
                    provider: provider.to_string(),
                    message,
                }
            }
            other => other,
        }
    }
}
