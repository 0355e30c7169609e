//! Application configuration module
//!
//! Provides the configuration types for the client. Values come from an
//! optional TOML file and can be overridden from the environment.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// REST base URL, e.g. `http://localhost:8080`
    pub server_url: Option<String>,
    /// Explicit message-bus URL; derived from `server_url` when unset
    pub websocket_url: Option<String>,
    /// Delay between a 401 notification and the forced logout
    pub logout_delay_ms: Option<u64>,
    /// How long a toast notification stays on screen
    pub toast_seconds: Option<u64>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig =
            toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::Io(e.to_string())),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.server_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }
        if let Some(url) = &self.websocket_url {
            if !(url.starts_with("ws://") || url.starts_with("wss://")) {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_url: Option<String>,
    websocket_url: Option<String>,
    logout_delay_ms: Option<u64>,
    toast_seconds: Option<u64>,
}

impl AppConfigBuilder {
    /// Set the server URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    /// Set the message-bus URL
    pub fn websocket_url(mut self, url: impl Into<String>) -> Self {
        self.websocket_url = Some(url.into());
        self
    }

    /// Set the forced-logout delay
    pub fn logout_delay_ms(mut self, millis: u64) -> Self {
        self.logout_delay_ms = Some(millis);
        self
    }

    /// Set the toast display time
    pub fn toast_seconds(mut self, seconds: u64) -> Self {
        self.toast_seconds = Some(seconds);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            server_url: self.server_url,
            websocket_url: self.websocket_url,
            logout_delay_ms: self.logout_delay_ms,
            toast_seconds: self.toast_seconds,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid config file: {0}")]
    Parse(String),
    #[error("cannot read config file: {0}")]
    Io(String),
}
