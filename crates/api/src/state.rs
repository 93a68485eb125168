use std::sync::Arc;

use bubble_core::config::AppConfig;
use bubble_queue::NotificationQueue;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Both fields are read-only after startup, so cloning per request is just
/// two `Arc` bumps.
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded at startup (commands, queue list, server settings).
    pub config: Arc<AppConfig>,
    /// Producer for the Poppit notification list.
    pub queue: Arc<dyn NotificationQueue>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, queue: Arc<dyn NotificationQueue>) -> Self {
        Self { config, queue }
    }
}
