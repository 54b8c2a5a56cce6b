//! Application State
//!
//! Shared state accessible by all API handlers. The dataset is generated
//! once before the server starts and is only ever read afterwards.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ApiConfig;
use crate::surveillance::Dataset;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Immutable session dataset
    pub dataset: Arc<Dataset>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, config: ApiConfig) -> Self {
        Self {
            dataset,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
