//! Shared application state for the API handlers.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::config::Config;
use crate::upstream::DataApi;

/// State shared by every request.
///
/// The data API client is created once before the listener opens and is
/// only read afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Data API client.
    pub api: Arc<dyn DataApi>,
    /// Token priced by `/ethtoken`.
    pub eth_token_address: Arc<str>,
    /// Secret for webhook signature checks (`None` disables them).
    pub webhook_secret: Option<Arc<str>>,
    /// Stream notifications accepted since start.
    pub webhook_notifications: Arc<AtomicU64>,
    /// Application start time for uptime tracking.
    pub start_time: DateTime<Utc>,
}

impl AppState {
    /// Create a new `AppState` from a client and the runtime configuration.
    pub fn new(api: Arc<dyn DataApi>, config: &Config) -> Self {
        Self {
            api,
            eth_token_address: Arc::from(config.eth_token_address()),
            webhook_secret: config.webhook_secret().map(Arc::from),
            webhook_notifications: Arc::new(AtomicU64::new(0)),
            start_time: Utc::now(),
        }
    }

    /// Count one accepted stream notification and return the new total.
    pub fn record_webhook(&self) -> u64 {
        self.webhook_notifications.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Stream notifications accepted so far.
    #[must_use]
    pub fn webhook_count(&self) -> u64 {
        self.webhook_notifications.load(Ordering::Relaxed)
    }
}
