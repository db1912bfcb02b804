//! Flutterwave rail against a mock Flutterwave API

use payrail_gateway::banking::providers::{FlutterwaveBankService, FlutterwaveConfig};
use payrail_gateway::banking::utils::RetryPolicy;
use payrail_gateway::{BankProvider, BankRailClient, BankServiceError};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_with(
    server: &MockServer,
    timeout_secs: u64,
    retry: RetryPolicy,
) -> FlutterwaveBankService {
    FlutterwaveBankService::new(FlutterwaveConfig {
        secret_key: "FLWSECK_TEST-abc".to_string(),
        base_url: server.uri(),
        timeout_secs,
        retry,
    })
    .expect("client should build")
}

fn client_with_retry(server: &MockServer, retry: RetryPolicy) -> FlutterwaveBankService {
    client_with(server, 5, retry)
}

fn client(server: &MockServer) -> FlutterwaveBankService {
    client_with_retry(server, RetryPolicy::none())
}

fn banks_body() -> serde_json::Value {
    json!({
        "status": "success",
        "message": "Banks fetched successfully",
        "data": [
            {"id": 280, "code": "058", "name": "GTBank Plc", "provider_type": "bank"},
            {"id": 191, "code": "044", "name": "Access Bank", "provider_type": "bank"}
        ]
    })
}

#[tokio::test]
async fn fetch_banks_scopes_by_country_and_preserves_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/banks/GH"))
        .and(query_param("include_provider_type", "1"))
        .and(header("authorization", "Bearer FLWSECK_TEST-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(banks_body()))
        .expect(1)
        .mount(&server)
        .await;

    let banks = client(&server).fetch_banks(Some("gh")).await;

    let codes: Vec<&str> = banks.iter().map(|b| b.code.as_str()).collect();
    assert_eq!(codes, vec!["058", "044"]);
    assert!(banks
        .iter()
        .all(|b| b.provider == BankProvider::Flutterwave));
}

#[tokio::test]
async fn fetch_banks_defaults_to_nigeria() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/banks/NG"))
        .and(query_param("include_provider_type", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(banks_body()))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(client(&server).fetch_banks(None).await.len(), 2);
}

#[tokio::test]
async fn fetch_banks_returns_empty_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/banks/NG"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "message": "Invalid authorization key",
            "data": null
        })))
        .mount(&server)
        .await;

    assert!(client(&server).fetch_banks(None).await.is_empty());
}

#[tokio::test]
async fn resolve_posts_account_and_prefers_confirmed_bank_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts/resolve"))
        .and(body_json(json!({
            "account_number": "0690000032",
            "account_bank": "44"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "Account details fetched",
            "data": {
                "account_number": "0690000032",
                "account_name": "Pastor Bright",
                "account_bank": "044"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let details = client(&server)
        .resolve_bank_account("0690000032", "44")
        .await
        .expect("account should resolve");
    assert_eq!(details.account_name, "Pastor Bright");
    assert_eq!(details.bank_code, "044");
    assert_eq!(details.provider, BankProvider::Flutterwave);
}

#[tokio::test]
async fn resolve_returns_none_on_bad_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts/resolve"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": "error",
            "message": "Sorry, that account number is invalid, please check and try again",
            "data": null
        })))
        .mount(&server)
        .await;

    assert!(client(&server)
        .resolve_bank_account("0000000000", "058")
        .await
        .is_none());
}

#[tokio::test]
async fn server_errors_are_retried_with_backoff() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/banks/NG"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/banks/NG"))
        .respond_with(ResponseTemplate::new(200).set_body_json(banks_body()))
        .expect(1)
        .mount(&server)
        .await;

    let rail = client_with_retry(
        &server,
        RetryPolicy {
            max_retries: 2,
            backoff: Duration::from_millis(5),
        },
    );
    assert_eq!(rail.fetch_banks(None).await.len(), 2);
}

#[tokio::test]
async fn business_failures_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts/resolve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "message": "Account could not be resolved",
            "data": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let rail = client_with_retry(
        &server,
        RetryPolicy {
            max_retries: 3,
            backoff: Duration::from_millis(5),
        },
    );
    let err = rail
        .try_resolve_bank_account("0123456789", "058")
        .await
        .expect_err("provider rejected the lookup");
    assert!(matches!(err, BankServiceError::ProviderRejected { .. }));
}

#[tokio::test]
async fn exhausted_rate_limit_surfaces_as_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/banks/NG"))
        .respond_with(ResponseTemplate::new(429))
        .expect(2)
        .mount(&server)
        .await;

    let rail = client_with_retry(
        &server,
        RetryPolicy {
            max_retries: 1,
            backoff: Duration::from_millis(5),
        },
    );
    let err = rail
        .try_fetch_banks(None)
        .await
        .expect_err("rate limited on every attempt");
    assert!(matches!(err, BankServiceError::RateLimited { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn slow_provider_times_out_as_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/banks/NG"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(banks_body())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let rail = client_with(&server, 1, RetryPolicy::none());
    let err = rail
        .try_fetch_banks(None)
        .await
        .expect_err("response arrives after the timeout");
    assert!(matches!(err, BankServiceError::Network { .. }));
    assert!(err.is_retryable());
    assert!(rail.fetch_banks(None).await.is_empty());
}

#[tokio::test]
async fn timed_out_attempt_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/banks/NG"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(banks_body())
                .set_delay(Duration::from_secs(3)),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/banks/NG"))
        .respond_with(ResponseTemplate::new(200).set_body_json(banks_body()))
        .expect(1)
        .mount(&server)
        .await;

    let rail = client_with(
        &server,
        1,
        RetryPolicy {
            max_retries: 1,
            backoff: Duration::from_millis(5),
        },
    );
    let banks = rail
        .try_fetch_banks(None)
        .await
        .expect("second attempt should succeed");
    assert_eq!(banks.len(), 2);
}

#[tokio::test]
async fn upstream_error_message_is_truncated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts/resolve"))
        .respond_with(ResponseTemplate::new(400).set_body_string("x".repeat(10_000)))
        .mount(&server)
        .await;

    let err = client(&server)
        .try_resolve_bank_account("0123456789", "058")
        .await
        .expect_err("bad request");
    match err {
        BankServiceError::Upstream {
            status, message, ..
        } => {
            assert_eq!(status, 400);
            assert!(message.len() < 512);
            assert!(message.ends_with("..."));
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}
