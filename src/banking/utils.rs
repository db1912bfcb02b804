use crate::banking::error::{BankServiceError, BankServiceResult};
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::{debug, warn, Instrument};
use uuid::Uuid;

/// Upper bound on upstream body text carried into error messages.
const MAX_ERROR_BODY_CHARS: usize = 256;

/// Retry behaviour for a single logical provider call.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: Duration::ZERO,
        }
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(1_u32 << attempt.min(16))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            backoff: Duration::from_millis(500),
        }
    }
}

#[derive(Clone)]
pub struct BankHttpClient {
    client: Client,
    timeout: Duration,
    retry: RetryPolicy,
}

impl BankHttpClient {
    pub fn new(timeout: Duration, retry: RetryPolicy) -> BankServiceResult<Self> {
        let client =
            Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| BankServiceError::Network {
                    message: format!("failed to initialize HTTP client: {}", e),
                })?;

        Ok(Self {
            client,
            timeout,
            retry,
        })
    }

    /// Sends a bearer-authenticated JSON request and decodes a 2xx body into `T`.
    ///
    /// Transport failures, HTTP 429 and 5xx responses are retried with
    /// exponential backoff. Any other non-2xx status fails immediately.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        bearer_token: &str,
        body: Option<&JsonValue>,
    ) -> BankServiceResult<T> {
        let span = tracing::debug_span!(
            "bank_rail_request",
            request_id = %Uuid::new_v4(),
            method = %method,
            path = %url.path(),
        );
        self.send_with_retries(method, url, bearer_token, body)
            .instrument(span)
            .await
    }

    async fn send_with_retries<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        bearer_token: &str,
        body: Option<&JsonValue>,
    ) -> BankServiceResult<T> {
        let mut last_error = None;
        for attempt in 0..=self.retry.max_retries {
            let mut request = self
                .client
                .request(method.clone(), url.clone())
                .timeout(self.timeout)
                .bearer_auth(bearer_token);
            if let Some(payload) = body {
                request = request.json(payload);
            }

            debug!(attempt = attempt + 1, "sending provider request");
            // Body read failures count as transport failures.
            let response = async {
                let resp = request.send().await?;
                let status = resp.status();
                let text = resp.text().await?;
                Ok::<_, reqwest::Error>((status, text))
            }
            .await
            .map_err(|e| BankServiceError::Network {
                message: format!("provider request failed: {}", e),
            });

            match response {
                Ok((status, text)) => {
                    if status.is_success() {
                        return serde_json::from_str::<T>(&text).map_err(|e| {
                            BankServiceError::MalformedResponse {
                                provider: "http".to_string(),
                                message: format!("invalid provider JSON response: {}", e),
                            }
                        });
                    }

                    let retryable = status.as_u16() == 429 || status.is_server_error();
                    if retryable && attempt < self.retry.max_retries {
                        warn!(
                            status = %status,
                            attempt = attempt + 1,
                            "provider returned a transient error, retrying"
                        );
                        tokio::time::sleep(self.retry.delay_for(attempt)).await;
                        continue;
                    }

                    if status.as_u16() == 429 {
                        return Err(BankServiceError::RateLimited {
                            message: "provider rate limit exceeded".to_string(),
                        });
                    }

                    return Err(BankServiceError::Upstream {
                        provider: "http".to_string(),
                        status: status.as_u16(),
                        message: format!("HTTP {}: {}", status, truncate_body(&text)),
                        retryable,
                    });
                }
                Err(e) => {
                    if attempt < self.retry.max_retries {
                        warn!(
                            error = %e,
                            attempt = attempt + 1,
                            "provider request failed, retrying"
                        );
                        tokio::time::sleep(self.retry.delay_for(attempt)).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(BankServiceError::Network {
            message: "provider request failed".to_string(),
        }))
    }
}

fn truncate_body(text: &str) -> String {
    match text.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Joins `path` onto `base_url`, appending `params` as a query string.
pub fn build_url(base_url: &str, path: &str, params: &[(&str, &str)]) -> BankServiceResult<Url> {
    let raw = format!("{}{}", base_url.trim_end_matches('/'), path);
    let parsed = if params.is_empty() {
        Url::parse(&raw)
    } else {
        Url::parse_with_params(&raw, params)
    };
    parsed.map_err(|e| BankServiceError::Configuration {
        message: format!("invalid provider URL {}: {}", raw, e),
        field: Some("base_url".to_string()),
    })
}
