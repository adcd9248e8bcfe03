use reqwest::{Client, StatusCode, header::CONTENT_TYPE};
use serde::Serialize;

use crate::handler::RelayError;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Body accepted by a Slack incoming webhook.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct NotificationPayload {
    pub text: String,
}

impl NotificationPayload {
    pub fn new_issue(issue_url: &str) -> Self {
        Self {
            text: format!("New GitHub Issue: {}", issue_url),
        }
    }
}

/// Posts notifications to Slack over a shared, long-lived HTTP client.
///
/// Cloning is cheap and all clones share the client's connection pool.
#[derive(Debug, Clone, Default)]
pub struct SlackNotifier {
    http_client: Client,
}

impl SlackNotifier {
    pub fn new(http_client: Client) -> Self {
        Self { http_client }
    }

    /// Sends one POST and returns the response status. No retries.
    pub async fn post(
        &self,
        url: &str,
        payload: &NotificationPayload,
    ) -> Result<StatusCode, RelayError> {
        let body = serde_json::to_vec(payload)?;

        let response = self
            .http_client
            .post(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        Ok(response.status())
    }
}
