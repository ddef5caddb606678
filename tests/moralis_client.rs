//! Integration tests for the `reqwest` data API client.
//!
//! A throwaway axum app on `127.0.0.1:0` plays the provider and echoes back
//! what it received.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::time::Duration;

use axum::body::Bytes;
use axum::http::{HeaderMap, Method as HttpMethod, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};

use web3_data_proxy::config::Config;
use web3_data_proxy::error::ProxyError;
use web3_data_proxy::upstream::{DataApi, MoralisClient, Service, UpstreamRequest};

async fn fake_provider(method: HttpMethod, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    match uri.path() {
        "/evm/unauthorized/balance" => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid API key" })),
        )
            .into_response(),
        "/evm/outage/balance" => (StatusCode::SERVICE_UNAVAILABLE, "").into_response(),
        "/evm/text/balance" => (StatusCode::OK, "definitely not json").into_response(),
        "/evm/slow/balance" => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({})).into_response()
        }
        path => Json(json!({
            "method": method.as_str(),
            "path": path,
            "query": uri.query(),
            "apiKey": headers.get("x-api-key").and_then(|v| v.to_str().ok()),
            "body": serde_json::from_slice::<Value>(&body).ok(),
        }))
        .into_response(),
    }
}

/// Start the fake provider and return a config pointing at it.
async fn spawn_provider() -> Config {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().fallback(fake_provider);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Config::new(
        "secret-key",
        format!("http://{addr}/evm").parse().unwrap(),
        format!("http://{addr}/aptos/").parse().unwrap(),
    )
}

#[tokio::test]
async fn test_get_sends_key_path_and_query() {
    let config = spawn_provider().await;
    let client = MoralisClient::new(&config).unwrap();

    let request = UpstreamRequest::get(Service::Evm, ["0xabc", "balance"]).param("chain", "0x1");
    let echo = client.call(request).await.unwrap();

    assert_eq!(echo["method"], "GET");
    assert_eq!(echo["path"], "/evm/0xabc/balance");
    assert_eq!(echo["query"], "chain=0x1");
    assert_eq!(echo["apiKey"], "secret-key");
}

#[tokio::test]
async fn test_aptos_requests_use_aptos_root() {
    let config = spawn_provider().await;
    let client = MoralisClient::new(&config).unwrap();

    let request = UpstreamRequest::get(Service::Aptos, ["accounts", "0x1", "transactions"])
        .param("limit", "10");
    let echo = client.call(request).await.unwrap();

    assert_eq!(echo["path"], "/aptos/accounts/0x1/transactions");
    assert_eq!(echo["query"], "limit=10");
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let config = spawn_provider().await;
    let client = MoralisClient::new(&config).unwrap();

    let body = json!({ "tokens": [{ "token_address": "0xed5a", "token_id": "1" }] });
    let request = UpstreamRequest::post(Service::Evm, ["nft", "getMultipleNFTs"], body.clone())
        .param("chain", "eth");
    let echo = client.call(request).await.unwrap();

    assert_eq!(echo["method"], "POST");
    assert_eq!(echo["path"], "/evm/nft/getMultipleNFTs");
    assert_eq!(echo["body"], body);
}

#[tokio::test]
async fn test_rejection_keeps_status_and_provider_message() {
    let config = spawn_provider().await;
    let client = MoralisClient::new(&config).unwrap();

    let err = client
        .call(UpstreamRequest::get(Service::Evm, ["unauthorized", "balance"]))
        .await
        .unwrap_err();

    assert!(matches!(
        &err,
        ProxyError::UpstreamError { message, status: Some(401), .. } if message == "Invalid API key"
    ));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_outage_is_retryable() {
    let config = spawn_provider().await;
    let client = MoralisClient::new(&config).unwrap();

    let err = client
        .call(UpstreamRequest::get(Service::Evm, ["outage", "balance"]))
        .await
        .unwrap_err();

    assert!(matches!(err, ProxyError::UpstreamError { status: Some(503), .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_non_json_success_is_upstream_error() {
    let config = spawn_provider().await;
    let client = MoralisClient::new(&config).unwrap();

    let err = client
        .call(UpstreamRequest::get(Service::Evm, ["text", "balance"]))
        .await
        .unwrap_err();

    assert!(matches!(err, ProxyError::UpstreamError { status: Some(200), .. }));
}

#[tokio::test]
async fn test_timeout_is_retryable_upstream_error() {
    let config = spawn_provider()
        .await
        .with_upstream_timeout(Duration::from_millis(200));
    let client = MoralisClient::new(&config).unwrap();

    let err = client
        .call(UpstreamRequest::get(Service::Evm, ["slow", "balance"]))
        .await
        .unwrap_err();

    assert!(matches!(err, ProxyError::UpstreamError { status: None, .. }));
    assert!(err.is_retryable());
}
