//! Relays GitHub issue-creation webhooks to a Slack incoming webhook.

pub mod config;
pub mod context;
pub mod event;
pub mod handler;
pub mod server;
pub mod slack;

pub use config::{ConfigSource, RelayConfig};
pub use context::{InvocationContext, LogSink};
pub use handler::{Outcome, RelayError, WebhookHandler};
pub use slack::{NotificationPayload, SlackNotifier};
