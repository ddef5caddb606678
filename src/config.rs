//! Configuration management for the Web3 data proxy.
//!
//! This module handles loading and validating configuration from environment variables
//! using the `dotenvy` crate. All operations return [`ProxyResult`].
//!
//! ## Environment Variables
//!
//! Required:
//! - `MORALIS_API_KEY`: API key for the hosted data API
//!
//! Optional (with defaults):
//! - `MORALIS_EVM_BASE_URL`: EVM API root (default: `https://deep-index.moralis.io/api/v2.2`)
//! - `MORALIS_APTOS_BASE_URL`: Aptos API root (default: `https://mainnet-aptos-api.moralis.io`)
//! - `PORT`: Listen port (default: 5001)
//! - `ETH_TOKEN_ADDRESS`: Token priced by `/ethtoken` (default: WETH)
//! - `RATE_LIMIT_RPM`: Inbound requests per minute (default: 600)
//! - `CORS_ORIGINS`: Comma-separated allowed origins (default: any)
//! - `UPSTREAM_TIMEOUT_SECS`: Per-call timeout for the data API (default: 30)
//! - `WEBHOOK_SECRET`: Enables `x-signature` verification on `/webhook`
//!
//! ## Example
//!
//! ```no_run
//! use web3_data_proxy::config::Config;
//! use web3_data_proxy::error::ProxyResult;
//!
//! # fn main() -> ProxyResult<()> {
//! let config = Config::from_env()?;
//! println!("Listening on port {}", config.port());
//! # Ok(())
//! # }
//! ```

use crate::error::{ProxyError, ProxyResult};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default root of the Moralis EVM API.
pub const DEFAULT_EVM_BASE_URL: &str = "https://deep-index.moralis.io/api/v2.2";

/// Default root of the Moralis Aptos API.
pub const DEFAULT_APTOS_BASE_URL: &str = "https://mainnet-aptos-api.moralis.io";

/// Wrapped Ether on Ethereum mainnet.
pub const DEFAULT_ETH_TOKEN_ADDRESS: &str = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";

const API_KEY_PLACEHOLDER: &str = "your_moralis_api_key_here";

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Data API key, sent as `X-API-Key`
    api_key: String,

    /// EVM API root URL
    evm_base_url: reqwest::Url,

    /// Aptos API root URL
    aptos_base_url: reqwest::Url,

    /// HTTP listen port
    port: u16,

    /// Token address priced by `/ethtoken`
    eth_token_address: String,

    /// Inbound requests allowed per minute
    rate_limit_rpm: u32,

    /// Allowed CORS origins (empty = any)
    cors_origins: Vec<String>,

    /// Upstream call timeout
    upstream_timeout: Duration,

    /// Shared secret for webhook signatures
    webhook_secret: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Loads a `.env` file first when one exists, then reads every variable,
    /// applying defaults for the optional ones.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::ConfigError`] if:
    /// - `MORALIS_API_KEY` is missing, empty or still the placeholder
    /// - A base URL does not parse
    /// - A numeric variable is not a number
    pub fn from_env() -> ProxyResult<Self> {
        // Load .env file if present (ignore error if file doesn't exist)
        dotenvy::dotenv().ok();

        let api_key = env::var("MORALIS_API_KEY").map_err(|e| {
            ProxyError::config(
                "MORALIS_API_KEY environment variable is required",
                Some(Box::new(e)),
            )
        })?;

        if api_key.trim().is_empty() || api_key == API_KEY_PLACEHOLDER {
            return Err(ProxyError::config(
                "MORALIS_API_KEY must be set to a valid API key",
                None,
            ));
        }

        let evm_base_url = parse_url("MORALIS_EVM_BASE_URL", DEFAULT_EVM_BASE_URL)?;
        let aptos_base_url = parse_url("MORALIS_APTOS_BASE_URL", DEFAULT_APTOS_BASE_URL)?;

        let port = parse_var::<u16>("PORT", "5001", "PORT must be a valid port number")?;
        let rate_limit_rpm = parse_var::<u32>(
            "RATE_LIMIT_RPM",
            "600",
            "RATE_LIMIT_RPM must be a valid number",
        )?;
        let timeout_secs = parse_var::<u64>(
            "UPSTREAM_TIMEOUT_SECS",
            "30",
            "UPSTREAM_TIMEOUT_SECS must be a valid number of seconds",
        )?;

        let eth_token_address = env::var("ETH_TOKEN_ADDRESS")
            .unwrap_or_else(|_| DEFAULT_ETH_TOKEN_ADDRESS.to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        let webhook_secret = env::var("WEBHOOK_SECRET")
            .ok()
            .filter(|secret| !secret.is_empty());

        Ok(Self {
            api_key,
            evm_base_url,
            aptos_base_url,
            port,
            eth_token_address,
            rate_limit_rpm,
            cors_origins,
            upstream_timeout: Duration::from_secs(timeout_secs),
            webhook_secret,
        })
    }

    /// Build a configuration directly, with defaults for everything but the
    /// key and the two API roots. Used by tests and embedders.
    #[must_use]
    pub fn new(
        api_key: impl Into<String>,
        evm_base_url: reqwest::Url,
        aptos_base_url: reqwest::Url,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            evm_base_url,
            aptos_base_url,
            port: 5001,
            eth_token_address: DEFAULT_ETH_TOKEN_ADDRESS.to_string(),
            rate_limit_rpm: 600,
            cors_origins: Vec::new(),
            upstream_timeout: Duration::from_secs(30),
            webhook_secret: None,
        }
    }

    /// Override the webhook secret.
    #[must_use]
    pub fn with_webhook_secret(mut self, secret: impl Into<String>) -> Self {
        self.webhook_secret = Some(secret.into());
        self
    }

    /// Override the upstream timeout.
    #[must_use]
    pub const fn with_upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = timeout;
        self
    }

    /// Override the listen port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Get the data API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the EVM API root.
    #[must_use]
    pub const fn evm_base_url(&self) -> &reqwest::Url {
        &self.evm_base_url
    }

    /// Get the Aptos API root.
    #[must_use]
    pub const fn aptos_base_url(&self) -> &reqwest::Url {
        &self.aptos_base_url
    }

    /// Get the listen port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Get the token address priced by `/ethtoken`.
    #[must_use]
    pub fn eth_token_address(&self) -> &str {
        &self.eth_token_address
    }

    /// Get the inbound rate limit.
    #[must_use]
    pub const fn rate_limit_rpm(&self) -> u32 {
        self.rate_limit_rpm
    }

    /// Get the allowed CORS origins.
    #[must_use]
    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    /// Get the upstream call timeout.
    #[must_use]
    pub const fn upstream_timeout(&self) -> Duration {
        self.upstream_timeout
    }

    /// Get the webhook secret, if verification is enabled.
    #[must_use]
    pub fn webhook_secret(&self) -> Option<&str> {
        self.webhook_secret.as_deref()
    }
}

fn parse_var<T>(name: &str, default: &str, message: &str) -> ProxyResult<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .trim()
        .parse::<T>()
        .map_err(|e| ProxyError::config(message, Some(Box::new(e))))
}

fn parse_url(name: &str, default: &str) -> ProxyResult<reqwest::Url> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    raw.parse::<reqwest::Url>().map_err(|e| {
        ProxyError::config(format!("{name} must be a valid URL, got: {raw}"), Some(Box::new(e)))
    })
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(ToString::to_string)
        .collect()
}
