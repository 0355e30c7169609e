use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};
use std::path::PathBuf;
use std::time::Duration;

/// Default server URL
const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Environment override for the server URL
const SERVER_URL_ENV: &str = "INSTACLONE_API_URL";

/// Default delay before a 401 forces logout
const DEFAULT_LOGOUT_DELAY_MS: u64 = 1000;

/// Default toast display time
const DEFAULT_TOAST_SECONDS: u64 = 3;

/// Application configuration wrapper.
#[derive(Debug, Clone, Default)]
pub struct Config {
    app: AppConfig,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        Ok(Self { app: builder.build()? })
    }

    /// Load `config.toml` from the user config directory, then apply the
    /// environment override.
    pub fn load() -> Result<Self, ConfigError> {
        let mut app = match Self::default_path() {
            Some(path) => AppConfig::load(&path)?,
            None => AppConfig::default(),
        };
        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            app.server_url = Some(url);
            app.validate()?;
        }
        Ok(Self { app })
    }

    /// `<config dir>/instaclone/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("instaclone").join("config.toml"))
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url(), path)
    }

    pub fn server_url(&self) -> &str {
        self.app
            .server_url
            .as_deref()
            .unwrap_or(DEFAULT_SERVER_URL)
            .trim_end_matches('/')
    }

    /// Raw WebSocket transport of the `/chat` message-bus endpoint
    pub fn chat_socket_url(&self) -> String {
        if let Some(url) = &self.app.websocket_url {
            return url.clone();
        }
        let server = self.server_url();
        let base = if let Some(rest) = server.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = server.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            server.to_string()
        };
        format!("{}/chat/websocket", base)
    }

    pub fn logout_delay(&self) -> Duration {
        Duration::from_millis(self.app.logout_delay_ms.unwrap_or(DEFAULT_LOGOUT_DELAY_MS))
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.app.toast_seconds.unwrap_or(DEFAULT_TOAST_SECONDS))
    }
}
