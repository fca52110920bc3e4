//! Configuration for the tasklet binary.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::shell::Tab;
use serde::Serialize;
use std::env;
use thiserror::Error;

const DEFAULT_LOG_FILTER: &str = "tasklet=info,tasklet_runtime=info";
const DEFAULT_SUBSCRIBER_WARN: usize = 16;

/// A configuration value that could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `TASKLET_START_TAB` is neither `tasks` nor `stats`
    #[error("TASKLET_START_TAB must be `tasks` or `stats`, got `{0}`")]
    StartTab(String),

    /// `TASKLET_ASCII` is not a boolean
    #[error("TASKLET_ASCII must be `true` or `false`, got `{0}`")]
    Ascii(String),

    /// `TASKLET_SUBSCRIBER_WARN` is not a positive integer
    #[error("TASKLET_SUBSCRIBER_WARN must be a positive integer, got `{0}`")]
    SubscriberWarn(String),
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    /// `tracing` filter directives
    pub log_filter: String,
    /// Tab shown at startup
    pub start_tab: Tab,
    /// Draw `[x]`/`[ ]` instead of `✓`/`○`
    pub ascii: bool,
    /// Live subscriber count above which the store warns
    pub subscriber_warn_threshold: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            start_tab: Tab::Tasks,
            ascii: false,
            subscriber_warn_threshold: DEFAULT_SUBSCRIBER_WARN,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to a value that does not
    /// parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to a value that does not
    /// parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let log_filter = lookup("TASKLET_LOG")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let start_tab = match lookup("TASKLET_START_TAB") {
            Some(raw) => raw.parse::<Tab>().map_err(|()| ConfigError::StartTab(raw))?,
            None => Tab::Tasks,
        };

        let ascii = match lookup("TASKLET_ASCII") {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::Ascii(raw))?,
            None => false,
        };

        let subscriber_warn_threshold = match lookup("TASKLET_SUBSCRIBER_WARN") {
            Some(raw) => raw
                .trim()
                .parse()
                .ok()
                .filter(|&n: &usize| n > 0)
                .ok_or(ConfigError::SubscriberWarn(raw))?,
            None => DEFAULT_SUBSCRIBER_WARN,
        };

        Ok(Self {
            log_filter,
            start_tab,
            ascii,
            subscriber_warn_threshold,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(load(&[]).unwrap(), AppConfig::default());
    }

    #[test]
    fn log_filter_prefers_tasklet_log() {
        let config = load(&[("RUST_LOG", "warn"), ("TASKLET_LOG", "tasklet=debug")]).unwrap();
        assert_eq!(config.log_filter, "tasklet=debug");

        let config = load(&[("RUST_LOG", "warn")]).unwrap();
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn parses_values() {
        let config = load(&[
            ("TASKLET_START_TAB", "Stats"),
            ("TASKLET_ASCII", "yes"),
            ("TASKLET_SUBSCRIBER_WARN", "4"),
        ])
        .unwrap();

        assert_eq!(config.start_tab, Tab::Stats);
        assert!(config.ascii);
        assert_eq!(config.subscriber_warn_threshold, 4);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            load(&[("TASKLET_START_TAB", "settings")]),
            Err(ConfigError::StartTab("settings".to_string()))
        );
        assert_eq!(
            load(&[("TASKLET_ASCII", "maybe")]),
            Err(ConfigError::Ascii("maybe".to_string()))
        );
        assert_eq!(
            load(&[("TASKLET_SUBSCRIBER_WARN", "0")]),
            Err(ConfigError::SubscriberWarn("0".to_string()))
        );
    }
}
