//! `reqwest` client for the Moralis EVM and Aptos APIs.
//!
//! The client is built once at startup. The API key is installed as a
//! sensitive default header, so it is sent with every call and never shows
//! up in `Debug` output or logs.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{StatusCode, Url};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::error::{ProxyError, ProxyResult};
use crate::upstream::{DataApi, Method, Service, UpstreamRequest};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Longest provider error text copied into an error message.
const MAX_ERROR_TEXT: usize = 512;

/// Moralis data API client.
#[derive(Debug, Clone)]
pub struct MoralisClient {
    http: reqwest::Client,
    evm_base_url: Url,
    aptos_base_url: Url,
}

impl MoralisClient {
    /// Build the client from configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the API key is not a valid header
    /// value or the TLS backend cannot be initialized.
    pub fn new(config: &Config) -> ProxyResult<Self> {
        let mut api_key = HeaderValue::from_str(config.api_key()).map_err(|e| {
            ProxyError::config(
                "MORALIS_API_KEY contains characters not allowed in a header",
                Some(Box::new(e)),
            )
        })?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.upstream_timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProxyError::config("failed to build HTTP client", Some(Box::new(e))))?;

        info!(
            evm = %config.evm_base_url(),
            aptos = %config.aptos_base_url(),
            timeout_secs = config.upstream_timeout().as_secs(),
            "Data API client initialized"
        );

        Ok(Self {
            http,
            evm_base_url: config.evm_base_url().clone(),
            aptos_base_url: config.aptos_base_url().clone(),
        })
    }

    /// Resolve the full URL of a request.
    ///
    /// Path segments are percent-encoded individually, so a caller-supplied
    /// address can never escape its segment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL cannot carry a path
    /// (e.g. `mailto:`).
    pub fn url_for(&self, request: &UpstreamRequest) -> ProxyResult<Url> {
        let mut url = match request.service {
            Service::Evm => self.evm_base_url.clone(),
            Service::Aptos => self.aptos_base_url.clone(),
        };

        url.path_segments_mut()
            .map_err(|()| ProxyError::config("data API base URL cannot carry a path", None))?
            .pop_if_empty()
            .extend(&request.path);

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }

        Ok(url)
    }
}

#[async_trait]
impl DataApi for MoralisClient {
    #[instrument(skip_all, fields(service = ?request.service, path = %request.display_path()))]
    async fn call(&self, request: UpstreamRequest) -> ProxyResult<Value> {
        let url = self.url_for(&request)?;

        let builder = match (request.method, request.body) {
            (Method::Get, _) => self.http.get(url),
            (Method::Post, Some(body)) => self.http.post(url).json(&body),
            (Method::Post, None) => self.http.post(url),
        };

        let started = Instant::now();
        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        debug!(
            status = status.as_u16(),
            bytes = bytes.len(),
            duration_ms = started.elapsed().as_millis(),
            "Data API responded"
        );

        if !status.is_success() {
            let message = error_message(status, &bytes);
            warn!(status = status.as_u16(), error = %message, "Data API rejected request");
            return Err(ProxyError::upstream(message, Some(status.as_u16()), None));
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            ProxyError::upstream(
                "data API returned a body that is not JSON",
                Some(status.as_u16()),
                Some(Box::new(e)),
            )
        })
    }
}

/// Extract the provider's explanation from an error body.
///
/// Moralis answers errors with `{"message": "..."}`; anything else is kept as
/// (truncated) text.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) {
        if let Some(Value::String(message)) = map.get("message") {
            return message.clone();
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string();
    }

    text.chars().take(MAX_ERROR_TEXT).collect()
}
