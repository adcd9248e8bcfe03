//! The webhook handler: GitHub issue event in, Slack notification out.
//!
//! Every invocation ends in an [`Outcome`]. Nothing is propagated to the
//! caller; faults are folded into [`Outcome::Fault`] and rendered as
//! `"Error: <message>"`.

use std::error::Error as _;
use std::fmt;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::config::RelayConfig;
use crate::context::LogSink;
use crate::event::{IssueUrl, issue_url};
use crate::slack::{NotificationPayload, SlackNotifier};

/// Unanticipated failures inside an invocation.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid JSON payload: {0}")]
    InvalidJson(serde_json::Error),

    #[error("expected {path} to be {expected}, found {found}")]
    UnexpectedShape {
        path: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl RelayError {
    /// The error message followed by each underlying cause, `: `-separated.
    ///
    /// reqwest's own message names only the URL; the refused connection or
    /// failed DNS lookup is further down the source chain.
    pub fn message(&self) -> String {
        let mut message = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !message.contains(&cause_text) {
                message.push_str(": ");
                message.push_str(&cause_text);
            }
            source = cause.source();
        }
        message
    }

    pub(crate) fn unexpected_shape(path: &'static str, found: &Value) -> Self {
        let expected = match path {
            "issue.html_url" => "a string",
            _ => "an object",
        };
        RelayError::UnexpectedShape {
            path,
            expected,
            found: json_type_name(found),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// How an invocation ended.
#[derive(Debug)]
pub enum Outcome {
    Success,
    IssueUrlNotFound,
    SlackUrlNotSet,
    DeliveryFailed(StatusCode),
    Fault(RelayError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => f.write_str("Success"),
            Outcome::IssueUrlNotFound => f.write_str("Issue URL not found."),
            Outcome::SlackUrlNotSet => f.write_str("SLACK_URL not set."),
            Outcome::DeliveryFailed(_) => f.write_str("Failed to post message to Slack."),
            Outcome::Fault(err) => write!(f, "Error: {}", err.message()),
        }
    }
}

impl From<Outcome> for String {
    fn from(outcome: Outcome) -> Self {
        outcome.to_string()
    }
}

/// Relays issue events to Slack.
///
/// Holds no per-invocation state, so one handler can serve concurrent
/// invocations.
#[derive(Debug, Clone, Default)]
pub struct WebhookHandler {
    notifier: SlackNotifier,
}

impl WebhookHandler {
    pub fn new(notifier: SlackNotifier) -> Self {
        Self { notifier }
    }

    /// Handles an event delivered as raw bytes. Malformed JSON is a fault.
    pub async fn handle_raw(
        &self,
        body: &[u8],
        config: &RelayConfig,
        log: &dyn LogSink,
    ) -> Outcome {
        match serde_json::from_slice::<Value>(body) {
            Ok(event) => self.handle(&event, config, log).await,
            Err(err) => {
                if config.log_payloads {
                    log.log_line(&format!(
                        "Received payload: {}",
                        String::from_utf8_lossy(body)
                    ));
                } else {
                    log_payload_size(body.len(), log);
                }
                fault(RelayError::InvalidJson(err), log)
            }
        }
    }

    pub async fn handle(
        &self,
        event: &Value,
        config: &RelayConfig,
        log: &dyn LogSink,
    ) -> Outcome {
        let payload = event.to_string();
        if config.log_payloads {
            log.log_line(&format!("Received payload: {}", payload));
        } else {
            log_payload_size(payload.len(), log);
        }

        match self.relay(event, config, log).await {
            Ok(outcome) => outcome,
            Err(err) => fault(err, log),
        }
    }

    async fn relay(
        &self,
        event: &Value,
        config: &RelayConfig,
        log: &dyn LogSink,
    ) -> Result<Outcome, RelayError> {
        let url = match issue_url(event)? {
            IssueUrl::Found(url) => url,
            IssueUrl::Missing => {
                log.log_line("Issue URL not found in payload.");
                return Ok(Outcome::IssueUrlNotFound);
            }
        };
        log.log_line(&format!("Extracted issue URL: {}", url));

        let Some(slack_url) = config.slack_url() else {
            log.log_line("Environment variable SLACK_URL is not set.");
            return Ok(Outcome::SlackUrlNotSet);
        };

        let payload = NotificationPayload::new_issue(url);
        let status = self.notifier.post(slack_url, &payload).await?;
        log.log_line(&format!("Response from Slack: {}", status));

        if status.is_success() {
            Ok(Outcome::Success)
        } else {
            Ok(Outcome::DeliveryFailed(status))
        }
    }
}

fn log_payload_size(bytes: usize, log: &dyn LogSink) {
    log.log_line(&format!("Received payload ({} bytes, contents not logged)", bytes));
}

fn fault(err: RelayError, log: &dyn LogSink) -> Outcome {
    let outcome = Outcome::Fault(err);
    log.log_line(&outcome.to_string());
    outcome
}
