//! Failure classification at the HTTP boundary.

mod common;

use common::{FakeApi, Reply};
use dn_client::{ApiClient, ApiError, ErrorKind, ItemService};
use dn_config::ApiConfig;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn unauthorized_carries_status_and_message() {
    let api = FakeApi::start();
    api.on("/items", Reply::json(401, json!({ "message": "invalid token" })));
    let client = Arc::new(api.client());

    let err = ItemService::new(client).all().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Http);
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.server_message(), Some("invalid token"));
}

#[tokio::test]
async fn status_without_json_body_has_no_message() {
    let api = FakeApi::start();
    api.on("/items", Reply::raw(500, "Internal Server Error"));
    let client = api.client();

    let err = client.get::<serde_json::Value>("/items").await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, message: None }));
    assert_eq!(err.user_message(), "Server error. Please try again later.");
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let api = FakeApi::start();
    api.on("/items", Reply::raw(200, "{\"isAutheticated\": tru"));
    let client = Arc::new(api.client());

    let err = ItemService::new(client).all().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Deserialization);
}

#[tokio::test]
async fn unreachable_host_is_a_connectivity_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = ApiClient::new(&ApiConfig {
        base_url: format!("http://127.0.0.1:{port}/api"),
        timeout_ms: 2_000,
        max_retries: 1,
        retry_delay_ms: 1,
    })
    .unwrap();

    let err = client.get::<serde_json::Value>("/items").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connectivity);
    assert!(err.is_transient());
    assert_eq!(
        err.user_message(),
        "Network error. Please check your internet connection and try again."
    );
}

#[tokio::test]
async fn empty_success_body_decodes_as_null() {
    let api = FakeApi::start();
    api.on("/auth/logout", Reply::raw(200, ""));
    let client = api.client();

    let value: Option<serde_json::Value> =
        client.post::<_, ()>("/auth/logout", None).await.unwrap();
    assert!(value.is_none());
}
