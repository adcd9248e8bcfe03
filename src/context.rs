//! Per-invocation context and the diagnostic log side-channel.

use chrono::{DateTime, Utc};
use tracing::info;

/// Line-oriented diagnostic output for one invocation.
///
/// Writes are fire-and-forget; they never influence the handler result.
pub trait LogSink: Send + Sync {
    fn log_line(&self, line: &str);
}

/// Metadata for a single inbound event.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    pub delivery_id: Option<String>,
    pub event_name: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl InvocationContext {
    pub fn new(delivery_id: Option<String>, event_name: Option<String>) -> Self {
        Self {
            delivery_id,
            event_name,
            received_at: Utc::now(),
        }
    }
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl LogSink for InvocationContext {
    fn log_line(&self, line: &str) {
        info!(
            delivery = self.delivery_id.as_deref().unwrap_or("-"),
            event = self.event_name.as_deref().unwrap_or("unknown"),
            received_at = %self.received_at.to_rfc3339(),
            "{}",
            line
        );
    }
}
