//! Shared helpers for integration tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use web3_data_proxy::api::server::build_router;
use web3_data_proxy::app_state::AppState;
use web3_data_proxy::config::Config;
use web3_data_proxy::error::ProxyResult;
use web3_data_proxy::upstream::{DataApi, UpstreamRequest};

type Responder = Box<dyn Fn(&UpstreamRequest) -> ProxyResult<Value> + Send + Sync>;

/// In-memory data API that records every call it receives.
pub struct StubApi {
    calls: Mutex<Vec<UpstreamRequest>>,
    responder: Responder,
}

impl StubApi {
    /// Answer every call with `response`.
    pub fn returning(response: Value) -> Arc<Self> {
        Self::with(move |_| Ok(response.clone()))
    }

    /// Answer each call with the result of `responder`.
    pub fn with<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&UpstreamRequest) -> ProxyResult<Value> + Send + Sync + 'static,
    {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        })
    }

    /// Calls received so far, in arrival order.
    pub fn calls(&self) -> Vec<UpstreamRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DataApi for StubApi {
    async fn call(&self, request: UpstreamRequest) -> ProxyResult<Value> {
        let response = (self.responder)(&request);
        self.calls.lock().unwrap().push(request);
        response
    }
}

/// Configuration pointing at unroutable roots; the stub never uses them.
pub fn test_config() -> Config {
    Config::new(
        "test-key",
        "http://127.0.0.1:9/evm".parse().unwrap(),
        "http://127.0.0.1:9/aptos".parse().unwrap(),
    )
}

/// Router backed by `api` with a generous rate limit.
pub fn router(api: Arc<StubApi>, config: &Config) -> Router {
    build_router(AppState::new(api, config), 600, &[])
}

/// Send one request through the router and return status, headers and JSON body.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

/// Build a GET request.
pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Build a POST request with a JSON body.
pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
