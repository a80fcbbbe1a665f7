//! Transport-level behavior of the commerce API client against a mock server.

use std::time::{Duration, Instant};

use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storefront_core::StoreConfig;
use storefront_data::{ClientSettings, DataError, FetchPolicy, RetryPolicy, StorefrontClient};

#[derive(Debug, Deserialize, PartialEq)]
struct ShopData {
    name: String,
}

fn test_store() -> StoreConfig {
    StoreConfig::new("test-shop.example.com", "test-token")
}

fn client_for(server: &MockServer) -> StorefrontClient {
    StorefrontClient::new(&test_store())
        .unwrap()
        .with_endpoint(format!("{}/graphql", server.uri()))
}

fn fast_client_for(server: &MockServer, timeout: Duration) -> StorefrontClient {
    let settings = ClientSettings {
        timeout,
        retry: RetryPolicy::default().with_base_delay(Duration::from_millis(10)),
    };
    StorefrontClient::with_settings(&test_store(), settings)
        .unwrap()
        .with_endpoint(format!("{}/graphql", server.uri()))
}

async fn mount_json(server: &MockServer, body: serde_json::Value, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn decodes_successful_payload() {
    let server = MockServer::start().await;
    mount_json(&server, json!({ "data": { "name": "packon" } }), 1).await;

    let client = client_for(&server);
    let payload = client
        .execute::<ShopData>("query Shop { shop { name } }", json!({}), &FetchPolicy::no_store())
        .await
        .unwrap();

    assert!(payload.is_ok());
    assert_eq!(payload.into_data(), Some(ShopData { name: "packon".into() }));
}

#[tokio::test]
async fn surfaces_graphql_errors_alongside_partial_data() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        json!({
            "data": { "name": "packon" },
            "errors": [{ "message": "field throttled" }]
        }),
        1,
    )
    .await;

    let client = client_for(&server);
    let payload = client
        .execute::<ShopData>("query Shop { shop { name } }", json!({}), &FetchPolicy::no_store())
        .await
        .unwrap();

    assert!(!payload.is_ok());
    assert_eq!(payload.errors[0].message, "field throttled");
    assert!(payload.data.is_some());
}

#[tokio::test]
async fn rate_limited_call_attempts_exactly_three_times_with_backoff() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let started = Instant::now();
    let result = client
        .execute::<ShopData>("query Shop { shop { name } }", json!({}), &FetchPolicy::no_store())
        .await;
    let elapsed = started.elapsed();

    match result {
        Err(DataError::Server { status: 429 }) => {}
        other => panic!("expected a server failure, got {:?}", other.map(|p| p.errors)),
    }
    // Two waits: 500ms after the first attempt, 1000ms after the second.
    assert!(elapsed >= Duration::from_millis(1400), "elapsed {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(6), "elapsed {:?}", elapsed);
}

#[tokio::test]
async fn retry_after_header_overrides_computed_backoff() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let started = Instant::now();
    let result = client
        .execute::<ShopData>("query Shop { shop { name } }", json!({}), &FetchPolicy::no_store())
        .await;

    assert!(result.is_err());
    // With Retry-After: 0 the 500ms/1000ms backoff must not apply.
    assert!(
        started.elapsed() < Duration::from_millis(500),
        "elapsed {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn application_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .execute::<ShopData>("query Shop { shop { name } }", json!({}), &FetchPolicy::no_store())
        .await;

    match result {
        Err(DataError::Api { status: 401, message }) => assert_eq!(message, "invalid token"),
        other => panic!("expected an api failure, got {:?}", other.map(|p| p.errors)),
    }
}

#[tokio::test]
async fn slow_responses_are_categorized_as_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "name": "packon" } }))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;

    let client = fast_client_for(&server, Duration::from_millis(100));
    let result = client
        .execute::<ShopData>("query Shop { shop { name } }", json!({}), &FetchPolicy::no_store())
        .await;

    match result {
        Err(error) => assert_eq!(error.category(), "timeout"),
        Ok(payload) => panic!("expected a timeout, got {:?}", payload.errors),
    }
}

#[tokio::test]
async fn refused_connections_are_categorized_as_network() {
    let settings = ClientSettings {
        timeout: Duration::from_secs(1),
        retry: RetryPolicy::default().with_base_delay(Duration::from_millis(10)),
    };
    // Port 1 is never listening.
    let client = StorefrontClient::with_settings(&test_store(), settings)
        .unwrap()
        .with_endpoint("http://127.0.0.1:1/graphql");

    let result = client
        .execute::<ShopData>("query Shop { shop { name } }", json!({}), &FetchPolicy::no_store())
        .await;

    match result {
        Err(error) => assert_eq!(error.category(), "network"),
        Ok(payload) => panic!("expected a network failure, got {:?}", payload.errors),
    }
}

#[tokio::test]
async fn cacheable_reads_hit_the_remote_once() {
    let server = MockServer::start().await;
    mount_json(&server, json!({ "data": { "name": "packon" } }), 1).await;

    let client = client_for(&server);
    let policy = FetchPolicy::cached(Duration::from_secs(60)).with_tag("shop");

    let first = client
        .execute::<ShopData>("query Shop { shop { name } }", json!({}), &policy)
        .await
        .unwrap();
    let second = client
        .execute::<ShopData>("query Shop { shop { name } }", json!({}), &policy)
        .await
        .unwrap();

    assert_eq!(first.into_data(), second.into_data());
}

#[tokio::test]
async fn tag_invalidation_forces_a_fresh_fetch() {
    let server = MockServer::start().await;
    mount_json(&server, json!({ "data": { "name": "packon" } }), 2).await;

    let client = client_for(&server);
    let policy = FetchPolicy::cached(Duration::from_secs(60)).with_tag("shop");

    client
        .execute::<ShopData>("query Shop { shop { name } }", json!({}), &policy)
        .await
        .unwrap();
    client.invalidate_tag("shop");
    client
        .execute::<ShopData>("query Shop { shop { name } }", json!({}), &policy)
        .await
        .unwrap();
}

#[tokio::test]
async fn no_store_policy_always_fetches() {
    let server = MockServer::start().await;
    mount_json(&server, json!({ "data": { "name": "packon" } }), 2).await;

    let client = client_for(&server);
    for _ in 0..2 {
        client
            .execute::<ShopData>("query Shop { shop { name } }", json!({}), &FetchPolicy::no_store())
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn errored_payloads_are_never_cached() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        json!({
            "data": { "name": "packon" },
            "errors": [{ "message": "partial" }]
        }),
        2,
    )
    .await;

    let client = client_for(&server);
    let policy = FetchPolicy::cached(Duration::from_secs(60));
    for _ in 0..2 {
        client
            .execute::<ShopData>("query Shop { shop { name } }", json!({}), &policy)
            .await
            .unwrap();
    }
}
