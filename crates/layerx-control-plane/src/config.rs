//! Control plane configuration.

use crate::pool::DEFAULT_TERMINAL_HISTORY;
use crate::reconciler::DEFAULT_STATUS_QUEUE_CAPACITY;

/// Control plane configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server bind address.
    pub http_bind_addr: String,

    /// Maximum status updates kept for draining.
    pub status_queue_capacity: usize,

    /// Number of terminated tasks kept for inspection.
    pub terminal_history: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_bind_addr: "0.0.0.0:5000".to_string(),
            status_queue_capacity: DEFAULT_STATUS_QUEUE_CAPACITY,
            terminal_history: DEFAULT_TERMINAL_HISTORY,
        }
    }
}
