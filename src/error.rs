//! Error types for the Web3 data proxy.
//!
//! This module provides a unified error type [`ProxyError`] covering every way
//! a proxied query can fail before it reaches the HTTP layer.
//!
//! # Design
//!
//! The error hierarchy separates who is at fault:
//! - [`ProxyError::ConfigError`]: Configuration and environment issues (fatal at startup)
//! - [`ProxyError::UpstreamError`]: The hosted data API failed, timed out or answered garbage
//! - [`ProxyError::ValidationError`]: The caller sent an unusable request
//!
//! Upstream failures carry the HTTP status returned by the provider (when
//! there was one) so that [`ProxyError::is_retryable`] can separate transient
//! outages from permanent rejections.
//!
//! # Example
//!
//! ```
//! use web3_data_proxy::error::{ProxyError, ProxyResult};
//!
//! fn require_address(address: Option<String>) -> ProxyResult<String> {
//!     address.ok_or_else(|| ProxyError::validation("address is required"))
//! }
//! ```

use std::fmt;

/// Result type alias using [`ProxyError`].
pub type ProxyResult<T> = Result<T, ProxyError>;

/// Unified error type for the proxy.
#[derive(Debug)]
pub enum ProxyError {
    /// Configuration or environment variable errors.
    ///
    /// Variants include:
    /// - Missing or placeholder API key
    /// - Malformed base URLs
    /// - Non-numeric port, timeout or rate limit values
    ConfigError {
        /// Human-readable error message
        message: String,
        /// Optional underlying error
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failure of the external data API call.
    ///
    /// Variants include:
    /// - Network errors and timeouts (no status)
    /// - Authentication failures (401/403)
    /// - Provider rejections and outages (4xx/5xx)
    /// - Response bodies that are not JSON
    UpstreamError {
        /// Human-readable error message
        message: String,
        /// HTTP status returned by the provider, if a response arrived
        status: Option<u16>,
        /// Optional underlying error
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The inbound request cannot form a valid outbound call.
    ValidationError {
        /// Human-readable error message
        message: String,
    },
}

impl ProxyError {
    /// Create a new configuration error.
    ///
    /// # Example
    ///
    /// ```
    /// use web3_data_proxy::error::ProxyError;
    ///
    /// let err = ProxyError::config("MORALIS_API_KEY not set", None);
    /// assert!(matches!(err, ProxyError::ConfigError { .. }));
    /// ```
    #[must_use]
    pub fn config(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ConfigError {
            message: message.into(),
            source,
        }
    }

    /// Create a new upstream error.
    ///
    /// # Example
    ///
    /// ```
    /// use web3_data_proxy::error::ProxyError;
    ///
    /// let err = ProxyError::upstream("provider unavailable", Some(503), None);
    /// assert!(err.is_retryable());
    /// ```
    #[must_use]
    pub fn upstream(
        message: impl Into<String>,
        status: Option<u16>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::UpstreamError {
            message: message.into(),
            status,
            source,
        }
    }

    /// Create a new validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    /// Whether repeating the same request later could succeed.
    ///
    /// Transport failures (no status), rate limiting (429) and server-side
    /// errors (5xx) are transient. Everything else, including every
    /// validation and configuration error, is permanent.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::UpstreamError { status: None, .. } => true,
            Self::UpstreamError {
                status: Some(code), ..
            } => *code == 429 || *code >= 500,
            Self::ConfigError { .. } | Self::ValidationError { .. } => false,
        }
    }
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigError { message, .. } => write!(f, "Configuration error: {message}"),
            Self::UpstreamError {
                message,
                status: Some(status),
                ..
            } => write!(f, "Upstream error ({status}): {message}"),
            Self::UpstreamError { message, .. } => write!(f, "Upstream error: {message}"),
            Self::ValidationError { message } => write!(f, "Validation error: {message}"),
        }
    }
}

impl std::error::Error for ProxyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigError { source, .. } | Self::UpstreamError { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &dyn std::error::Error),
            Self::ValidationError { .. } => None,
        }
    }
}

/// Transport-level failures from the HTTP client are upstream errors.
///
/// The status is kept when the failure came from a response
/// (`error_for_status`); timeouts and connection errors have none.
impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        let message = if err.is_timeout() {
            "request to data API timed out".to_string()
        } else if err.is_connect() {
            "failed to connect to data API".to_string()
        } else {
            format!("data API request failed: {err}")
        };
        Self::UpstreamError {
            message,
            status,
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_config_error() {
        let err = ProxyError::config("test error", None);
        assert!(matches!(err, ProxyError::ConfigError { .. }));
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_upstream_error_display() {
        let err = ProxyError::upstream("invalid key", Some(401), None);
        assert_eq!(err.to_string(), "Upstream error (401): invalid key");

        let err = ProxyError::upstream("connection reset", None, None);
        assert_eq!(err.to_string(), "Upstream error: connection reset");
    }

    #[test]
    fn test_validation_error() {
        let err = ProxyError::validation("address is required");
        assert!(matches!(err, ProxyError::ValidationError { .. }));
        assert_eq!(err.to_string(), "Validation error: address is required");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_retryable_classification() {
        assert!(ProxyError::upstream("timeout", None, None).is_retryable());
        assert!(ProxyError::upstream("slow down", Some(429), None).is_retryable());
        assert!(ProxyError::upstream("outage", Some(502), None).is_retryable());

        assert!(!ProxyError::upstream("bad key", Some(401), None).is_retryable());
        assert!(!ProxyError::upstream("not found", Some(404), None).is_retryable());
        assert!(!ProxyError::validation("missing chain").is_retryable());
        assert!(!ProxyError::config("no key", None).is_retryable());
    }

    #[test]
    fn test_error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ProxyError::config("failed to load", Some(Box::new(source)));

        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "Configuration error: failed to load");
    }
}
