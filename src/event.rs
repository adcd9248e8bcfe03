//! Navigation over the inbound GitHub event document.
//!
//! The event is kept as an untyped [`serde_json::Value`]; the only path the
//! relay cares about is `issue.html_url`. Every other field is ignored.

use serde_json::Value;

use crate::handler::RelayError;

/// Result of looking up the issue URL in an event.
#[derive(Debug, PartialEq, Eq)]
pub enum IssueUrl<'a> {
    Found(&'a str),
    /// `issue` or `issue.html_url` is absent.
    Missing,
}

/// Looks up `event.issue.html_url`.
///
/// An absent field at either step is [`IssueUrl::Missing`]. A field that is
/// present with the wrong JSON type is a fault, as is a non-object event.
pub fn issue_url(event: &Value) -> Result<IssueUrl<'_>, RelayError> {
    let root = event
        .as_object()
        .ok_or_else(|| RelayError::unexpected_shape("event", event))?;

    let Some(issue) = root.get("issue") else {
        return Ok(IssueUrl::Missing);
    };
    let issue = issue
        .as_object()
        .ok_or_else(|| RelayError::unexpected_shape("issue", issue))?;

    let Some(html_url) = issue.get("html_url") else {
        return Ok(IssueUrl::Missing);
    };
    html_url
        .as_str()
        .map(IssueUrl::Found)
        .ok_or_else(|| RelayError::unexpected_shape("issue.html_url", html_url))
}
