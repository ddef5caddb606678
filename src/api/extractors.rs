//! Custom extractors for API parameters.
//!
//! Axum's stock `Query` and `Json` reject with plain-text bodies and a mix
//! of 400, 415 and 422. These wrappers turn every rejection into
//! [`ApiError::BadRequest`], so callers always get the JSON validation error.

use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::api::middleware::error::ApiError;

/// Query string deserialized into `T`.
///
/// A malformed query or a single-valued parameter given twice is a
/// validation error.
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// JSON request body deserialized into `T`.
///
/// Broken JSON, a missing `Content-Type: application/json` and fields of the
/// wrong type are all validation errors.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::models::AddressChainQuery;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;

    async fn query(uri: &str) -> Result<AddressChainQuery, ApiError> {
        let (mut parts, ()) = axum::http::Request::builder()
            .uri(uri)
            .body(())
            .unwrap()
            .into_parts();
        ApiQuery::<AddressChainQuery>::from_request_parts(&mut parts, &())
            .await
            .map(|ApiQuery(value)| value)
    }

    #[tokio::test]
    async fn test_query_keeps_values() {
        let value = query("/balance?address=0xabc&chain=0x1").await.unwrap();
        assert_eq!(value.address.as_deref(), Some("0xabc"));
        assert_eq!(value.chain.as_deref(), Some("0x1"));
    }

    #[tokio::test]
    async fn test_duplicate_query_field_is_bad_request() {
        let result = query("/balance?address=0xabc&chain=0x1&chain=0x89").await;
        assert!(matches!(result, Err(ApiError::BadRequest(message)) if message.contains("chain")));
    }

    #[tokio::test]
    async fn test_json_without_content_type_is_bad_request() {
        let request = axum::http::Request::builder()
            .method("POST")
            .body(Body::from(r#"{"tokens":[]}"#))
            .unwrap();

        let result = ApiJson::<serde_json::Value>::from_request(request, &()).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_json_with_content_type_is_accepted() {
        let request = axum::http::Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"tokens":[]}"#))
            .unwrap();

        let ApiJson(value) = ApiJson::<serde_json::Value>::from_request(request, &())
            .await
            .unwrap();
        assert_eq!(value["tokens"], serde_json::json!([]));
    }
}
