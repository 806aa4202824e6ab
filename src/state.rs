use std::sync::Arc;

use crate::{
    assignment::SnapshotStore,
    notification::NotificationDispatcher,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub snapshot_store: Arc<dyn SnapshotStore>,
    pub dispatcher: NotificationDispatcher,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String,
    pub database_url: String,
    pub slack_token: String,
    pub slack_channel_id: String,
    pub slack_owner_id: String,
    pub slack_api_url: String,
    pub homepage_url: String,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("PORT must be a number, got {0:?}")]
    InvalidPort(String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let port = lookup("PORT").unwrap_or_else(|| "3000".to_string());
        let port = port.parse().map_err(|_| ConfigError::InvalidPort(port))?;

        Ok(Self {
            api_key: required("API_KEY")?,
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://assignments.db?mode=rwc".to_string()),
            slack_token: required("SLACK_TOKEN")?,
            slack_channel_id: required("SLACK_CHANNEL_ID")?,
            slack_owner_id: required("SLACK_OWNER_ID")?,
            slack_api_url: lookup("SLACK_API_URL")
                .unwrap_or_else(|| "https://slack.com/api".to_string()),
            homepage_url: lookup("HOMEPAGE_URL").unwrap_or_else(|| "/swagger-ui".to_string()),
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn required_only() -> HashMap<String, String> {
        env(&[
            ("API_KEY", "secret"),
            ("SLACK_TOKEN", "xoxb-test"),
            ("SLACK_CHANNEL_ID", "C123"),
            ("SLACK_OWNER_ID", "U123"),
        ])
    }

    #[test]
    fn test_defaults_applied() {
        let vars = required_only();
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.database_url, "sqlite://assignments.db?mode=rwc");
        assert_eq!(config.slack_api_url, "https://slack.com/api");
        assert_eq!(config.server_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_missing_required_variable() {
        let mut vars = required_only();
        vars.remove("SLACK_OWNER_ID");

        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SLACK_OWNER_ID")));
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let mut vars = required_only();
        vars.insert("API_KEY".into(), String::new());

        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("API_KEY")));
    }

    #[test]
    fn test_invalid_port() {
        let mut vars = required_only();
        vars.insert("PORT".into(), "eighty".into());

        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(_)));
    }
}
