//! Relay configuration.

use std::env;

/// Environment variable holding the Slack incoming-webhook URL.
pub const SLACK_URL_VAR: &str = "SLACK_URL";

/// Configuration resolved for a single invocation.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub slack_url: Option<String>,
    /// Write the full inbound payload to the log. Payloads may carry
    /// user-authored content, so hosts can switch this off.
    pub log_payloads: bool,
}

impl RelayConfig {
    pub fn new(slack_url: impl Into<String>) -> Self {
        Self {
            slack_url: Some(slack_url.into()),
            log_payloads: true,
        }
    }

    pub fn from_env() -> Self {
        Self {
            slack_url: env::var(SLACK_URL_VAR).ok(),
            log_payloads: true,
        }
    }

    pub fn with_payload_logging(mut self, enabled: bool) -> Self {
        self.log_payloads = enabled;
        self
    }

    /// The Slack URL, treating an empty value the same as an unset one.
    pub fn slack_url(&self) -> Option<&str> {
        self.slack_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Where the handler host gets its [`RelayConfig`] from on each invocation.
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Re-read the process environment every time.
    Env { log_payloads: bool },
    Fixed(RelayConfig),
}

impl ConfigSource {
    pub fn resolve(&self) -> RelayConfig {
        match self {
            ConfigSource::Env { log_payloads } => {
                RelayConfig::from_env().with_payload_logging(*log_payloads)
            }
            ConfigSource::Fixed(config) => config.clone(),
        }
    }
}

impl Default for ConfigSource {
    fn default() -> Self {
        ConfigSource::Env { log_payloads: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_url_counts_as_unset() {
        let config = RelayConfig::new("");
        assert_eq!(config.slack_url(), None);
    }

    #[test]
    fn env_source_is_re_read_each_time() {
        let source = ConfigSource::default();

        temp_env::with_var(SLACK_URL_VAR, Some("https://hooks.slack.test/a"), || {
            assert_eq!(
                source.resolve().slack_url(),
                Some("https://hooks.slack.test/a")
            );
        });
        temp_env::with_var(SLACK_URL_VAR, Some("https://hooks.slack.test/b"), || {
            assert_eq!(
                source.resolve().slack_url(),
                Some("https://hooks.slack.test/b")
            );
        });
        temp_env::with_var_unset(SLACK_URL_VAR, || {
            assert_eq!(source.resolve().slack_url(), None);
        });
    }

    #[test]
    fn fixed_source_ignores_env() {
        let source = ConfigSource::Fixed(
            RelayConfig::new("https://hooks.slack.test/fixed").with_payload_logging(false),
        );
        temp_env::with_var(SLACK_URL_VAR, Some("https://hooks.slack.test/env"), || {
            let config = source.resolve();
            assert_eq!(config.slack_url(), Some("https://hooks.slack.test/fixed"));
            assert!(!config.log_payloads);
        });
    }
}
