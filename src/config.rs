//! Game client configuration.

use std::path::Path;
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Configuration for the game client.
///
/// Every field has a default, so an empty TOML document is a valid
/// configuration.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Base URL of the relay server.
    #[serde(default = "default_relay_url")]
    relay_url: String,

    /// Cosmetic delay before the bot reply, in milliseconds.
    #[serde(default = "default_bot_delay_ms")]
    bot_delay_ms: u64,

    /// Interval between relay heartbeats, in seconds.
    #[serde(default = "default_heartbeat_secs")]
    heartbeat_secs: u64,
}

fn default_relay_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_bot_delay_ms() -> u64 {
    300
}

fn default_heartbeat_secs() -> u64 {
    15
}

impl GameConfig {
    /// Parses a configuration from TOML text.
    #[instrument(skip(text))]
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        debug!(relay_url = %config.relay_url, "Config parsed");
        Ok(config)
    }

    /// Loads a configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!("Config loaded successfully");
        Ok(config)
    }

    /// The bot-reply delay as a duration.
    pub fn bot_delay(&self) -> Duration {
        Duration::from_millis(self.bot_delay_ms)
    }

    /// The heartbeat interval as a duration.
    pub fn heartbeat(&self) -> Duration {
        Duration::from_secs(self.heartbeat_secs)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            relay_url: default_relay_url(),
            bot_delay_ms: default_bot_delay_ms(),
            heartbeat_secs: default_heartbeat_secs(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {message}")]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    /// Creates a new configuration error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = GameConfig::from_toml("").unwrap();
        assert_eq!(config.relay_url(), "http://localhost:3001");
        assert_eq!(config.bot_delay(), Duration::from_millis(300));
        assert_eq!(config.heartbeat(), Duration::from_secs(15));
    }

    #[test]
    fn test_partial_document_overrides() {
        let config = GameConfig::from_toml("bot_delay_ms = 0\n").unwrap();
        assert_eq!(config.bot_delay(), Duration::ZERO);
        assert_eq!(*config.heartbeat_secs(), 15);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(GameConfig::from_toml("bot_delay_ms = \"soon\"").is_err());
    }
}
