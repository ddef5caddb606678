//! Stream notification receiver.
//!
//! When a secret is configured, the provider signs every notification as
//! `0x` + hex(keccak256(body ‖ secret)) in the `x-signature` header.

use alloy::primitives::{hex, keccak256};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use tracing::{debug, info, instrument};

use crate::api::middleware::error::ApiError;
use crate::api::models::{StreamPayload, TransferEvent};
use crate::app_state::AppState;

/// Header carrying the notification signature.
pub const SIGNATURE_HEADER: &str = "x-signature";

/// Compute the signature the provider attaches to `body`.
#[must_use]
pub fn sign_payload(body: &[u8], secret: &str) -> String {
    let mut signed = Vec::with_capacity(body.len() + secret.len());
    signed.extend_from_slice(body);
    signed.extend_from_slice(secret.as_bytes());
    hex::encode_prefixed(keccak256(&signed))
}

/// Check a received signature against `body`. Hex case is ignored.
#[must_use]
pub fn verify_signature(body: &[u8], secret: &str, signature: &str) -> bool {
    signature.trim().eq_ignore_ascii_case(&sign_payload(body, secret))
}

#[utoipa::path(
    post,
    path = "/webhook",
    request_body = StreamPayload,
    responses(
        (status = 200, description = "Notification accepted"),
        (status = 400, description = "Body is not a stream notification"),
        (status = 401, description = "Signature missing or invalid")
    ),
    tag = "Webhook"
)]
/// Accepts a stream notification and logs its transfers.
#[instrument(skip_all)]
pub async fn receive_stream(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    if let Some(secret) = state.webhook_secret.as_deref() {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("missing x-signature header".to_string()))?;

        if !verify_signature(&body, secret, signature) {
            return Err(ApiError::Unauthorized("invalid webhook signature".to_string()));
        }
    }

    let payload: StreamPayload = if body.iter().all(u8::is_ascii_whitespace) {
        StreamPayload::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("invalid stream notification: {e}")))?
    };

    for transfer in &payload.erc20_transfers {
        log_transfer("erc20", &payload, transfer);
    }
    for transfer in &payload.nft_transfers {
        log_transfer("nft", &payload, transfer);
    }

    let total = state.record_webhook();
    debug!(
        stream_id = %payload.stream_id,
        transfers = payload.transfer_count(),
        total,
        "Stream notification accepted"
    );

    Ok(StatusCode::OK)
}

fn log_transfer(kind: &str, payload: &StreamPayload, transfer: &TransferEvent) {
    info!(
        kind,
        chain = %payload.chain_id,
        confirmed = payload.confirmed,
        tag = %payload.tag,
        tx = %transfer.transaction_hash,
        contract = %transfer.contract,
        from = %transfer.from,
        to = %transfer.to,
        value = transfer.value.as_deref(),
        token_id = transfer.token_id.as_deref(),
        symbol = transfer.token_symbol.as_deref(),
        "Transfer received"
    );
}
