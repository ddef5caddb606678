//! Unified API error handling.
//!
//! An upstream failure keeps the response body the callers already depend
//! on (`400 {}`). Headers carry the classification:
//!
//! - `x-proxy-error: upstream`
//! - `x-proxy-retryable: true|false`
//!
//! Missing request parameters answer with a descriptive JSON body instead.

use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::api::models::ErrorResponse;
use crate::error::ProxyError;

/// Header naming the failing side of a proxied call.
pub const PROXY_ERROR_HEADER: &str = "x-proxy-error";

/// Header telling callers whether repeating the request may help.
pub const PROXY_RETRYABLE_HEADER: &str = "x-proxy-retryable";

/// API-specific error type.
#[derive(Debug)]
pub enum ApiError {
    /// The data API call failed.
    Upstream {
        /// Error description, logged but never returned
        message: String,
        /// Whether the failure is transient
        retryable: bool,
    },
    /// Invalid request parameters.
    BadRequest(String),
    /// Webhook signature missing or wrong.
    Unauthorized(String),
    /// Rate limit exceeded.
    RateLimitExceeded,
    /// Internal server error.
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            Self::Upstream { message, retryable } => {
                error!(error = %message, retryable, "Data API call failed");
                let retryable = if retryable { "true" } else { "false" };
                return (
                    StatusCode::BAD_REQUEST,
                    [
                        (
                            HeaderName::from_static(PROXY_ERROR_HEADER),
                            HeaderValue::from_static("upstream"),
                        ),
                        (
                            HeaderName::from_static(PROXY_RETRYABLE_HEADER),
                            HeaderValue::from_static(retryable),
                        ),
                    ],
                    Json(json!({})),
                )
                    .into_response();
            }
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg),
            Self::Unauthorized(msg) => {
                warn!(reason = %msg, "Rejected unauthenticated request");
                (StatusCode::UNAUTHORIZED, "unauthorized", msg)
            }
            Self::RateLimitExceeded => (
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limit_exceeded",
                "Rate limit exceeded. Please try again later.".to_string(),
            ),
            Self::InternalError(msg) => {
                error!(error = %msg, "Internal error in API handler");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<ProxyError> for ApiError {
    fn from(err: ProxyError) -> Self {
        match err {
            ProxyError::UpstreamError { .. } => Self::Upstream {
                retryable: err.is_retryable(),
                message: err.to_string(),
            },
            ProxyError::ValidationError { message } => Self::BadRequest(message),
            ProxyError::ConfigError { .. } => Self::InternalError(err.to_string()),
        }
    }
}
