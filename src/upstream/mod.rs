//! Outbound calls to the hosted Web3 data API.
//!
//! Handlers never talk HTTP to the provider directly. They describe the call
//! as an [`UpstreamRequest`] and hand it to a [`DataApi`] implementation:
//!
//! ```text
//! handler ──UpstreamRequest──▶ dyn DataApi ──▶ MoralisClient (reqwest)
//!                                     └──────▶ test stub
//! ```
//!
//! Request values are carried verbatim. Absent optional parameters are left
//! out instead of defaulted, so the provider applies its own defaults.

pub mod moralis;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ProxyResult;

pub use moralis::MoralisClient;

/// Which provider API a request is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// EVM chains (Ethereum, Polygon, BSC, ...).
    Evm,
    /// Aptos mainnet.
    Aptos,
}

/// HTTP method of an outbound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read query.
    Get,
    /// Read query with a JSON body (batch lookups).
    Post,
}

/// A single outbound call to the data API.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequest {
    /// Target API.
    pub service: Service,
    /// HTTP method.
    pub method: Method,
    /// Path segments below the service root, unescaped.
    pub path: Vec<String>,
    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,
    /// JSON body for POST calls.
    pub body: Option<Value>,
}

impl UpstreamRequest {
    /// Start a GET request.
    ///
    /// ```
    /// use web3_data_proxy::upstream::{Service, UpstreamRequest};
    ///
    /// let request = UpstreamRequest::get(Service::Evm, ["0xabc", "balance"])
    ///     .param("chain", "0x1");
    /// assert_eq!(request.query_value("chain"), Some("0x1"));
    /// ```
    #[must_use]
    pub fn get<I, S>(service: Service, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            service,
            method: Method::Get,
            path: path.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Start a POST request carrying `body`.
    #[must_use]
    pub fn post<I, S>(service: Service, path: I, body: Value) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: Method::Post,
            body: Some(body),
            ..Self::get(service, path)
        }
    }

    /// Append a query parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Append a query parameter only when the caller supplied it.
    #[must_use]
    pub fn opt_param(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.param(name, value),
            None => self,
        }
    }

    /// First value of the named query parameter.
    #[must_use]
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Path rendered for logs, e.g. `/0xabc/balance`.
    #[must_use]
    pub fn display_path(&self) -> String {
        format!("/{}", self.path.join("/"))
    }
}

/// A read-only client for the hosted data API.
///
/// Implementations are shared across all requests after startup and must not
/// rely on per-request mutable state.
#[async_trait]
pub trait DataApi: Send + Sync {
    /// Perform one outbound call and return the provider's JSON body as-is.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ProxyError::UpstreamError`] for any transport,
    /// status or decoding failure.
    async fn call(&self, request: UpstreamRequest) -> ProxyResult<Value>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_builder_keeps_values_verbatim() {
        let request = UpstreamRequest::get(Service::Evm, ["0xAbC", "erc20"])
            .param("chain", "polygon")
            .param("limit", "007");

        assert_eq!(request.method, Method::Get);
        assert_eq!(request.path, vec!["0xAbC", "erc20"]);
        assert_eq!(request.query_value("chain"), Some("polygon"));
        assert_eq!(request.query_value("limit"), Some("007"));
        assert!(request.body.is_none());
    }

    #[test]
    fn test_opt_param_skips_missing_values() {
        let request = UpstreamRequest::get(Service::Aptos, ["accounts"])
            .opt_param("limit", None::<String>)
            .opt_param("offset", Some("20"));

        assert_eq!(request.query, vec![("offset".to_string(), "20".to_string())]);
    }

    #[test]
    fn test_post_builder() {
        let body = json!({ "tokens": [] });
        let request = UpstreamRequest::post(Service::Evm, ["nft", "getMultipleNFTs"], body.clone());

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.body, Some(body));
        assert_eq!(request.display_path(), "/nft/getMultipleNFTs");
    }
}
