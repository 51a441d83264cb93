// domain-hunter-lib/tests/rdap_mock.rs

//! RDAP client behavior against a local mock server.

use domain_hunter_lib::{DomainStatus, Probe, RdapClient, RegistryLookup};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

fn client_for(server: &MockServer, timeout: Duration) -> RdapClient {
    RdapClient::with_config(server.base_url(), timeout).unwrap()
}

#[tokio::test]
async fn test_not_found_is_available() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/domain/acme.com");
            then.status(404);
        })
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let probe = client.lookup("acme.com").await;

    mock.assert_async().await;
    assert_eq!(probe, Probe::Conclusive(DomainStatus::Available));
}

#[tokio::test]
async fn test_active_status_is_registered() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/domain/google.com");
            then.status(200)
                .header("content-type", "application/rdap+json")
                .json_body(json!({
                    "objectClassName": "domain",
                    "ldhName": "GOOGLE.COM",
                    "status": ["client delete prohibited", "Active"]
                }));
        })
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    assert_eq!(
        client.lookup("google.com").await,
        Probe::Conclusive(DomainStatus::Registered)
    );
}

#[tokio::test]
async fn test_nameservers_only_is_registered() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/domain/zeta.ai");
            then.status(200).json_body(json!({
                "nameservers": [{ "ldhName": "ns1.example.net" }]
            }));
        })
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    assert_eq!(
        client.lookup("zeta.ai").await,
        Probe::Conclusive(DomainStatus::Registered)
    );
}

#[tokio::test]
async fn test_empty_record_is_inconclusive() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/domain/odd.so");
            then.status(200).json_body(json!({ "status": [], "entities": [] }));
        })
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    assert!(matches!(client.lookup("odd.so").await, Probe::Inconclusive(_)));
}

#[tokio::test]
async fn test_server_error_is_inconclusive() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/domain/acme.app");
            then.status(500);
        })
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    assert!(matches!(client.lookup("acme.app").await, Probe::Inconclusive(_)));
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/domain/slow.com");
            then.status(404).delay(Duration::from_secs(3));
        })
        .await;

    let client = client_for(&server, Duration::from_millis(200));
    match client.lookup("slow.com").await {
        Probe::Inconclusive(reason) => assert!(reason.contains("RDAP request")),
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_inconclusive() {
    let client = RdapClient::with_config("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
    assert!(matches!(client.lookup("acme.com").await, Probe::Inconclusive(_)));
}
