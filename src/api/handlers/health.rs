//! Health check endpoint.

use axum::{extract::State, Json};
use chrono::Utc;
use tracing::instrument;

use crate::api::models::HealthResponse;
use crate::app_state::AppState;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "Health"
)]
/// Returns service health information. Never calls the data API.
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = (Utc::now() - state.start_time).num_seconds().max(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at: state.start_time,
        uptime_seconds: u64::try_from(uptime).unwrap_or_default(),
        webhook_notifications: state.webhook_count(),
    })
}
