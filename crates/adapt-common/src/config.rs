//! Client configuration
//!
//! Loads settings from `ADAPT_`-prefixed environment variables (a `.env`
//! file is honored). Programmatic construction works the same way; the env
//! path is a convenience for binaries and tests.

use serde::Deserialize;

use crate::server::ServerConfig;

/// Everything configurable about a client
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Authentication token; may be absent when logging in by credentials
    #[serde(default)]
    pub token: Option<String>,
    /// REST API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Gateway (websocket) URL
    #[serde(default = "default_harmony_url")]
    pub harmony_url: String,
    /// CDN base URL
    #[serde(default = "default_convey_url")]
    pub convey_url: String,
    /// Prefer the binary (MessagePack) wire format over JSON
    #[serde(default = "default_prefer_msgpack")]
    pub prefer_msgpack: bool,
    /// Seconds between heartbeats
    #[serde(default = "default_heartbeat_interval_secs")]
    pub heartbeat_interval_secs: f64,
    /// Seconds to wait for a heartbeat acknowledgement
    #[serde(default = "default_heartbeat_timeout_secs")]
    pub heartbeat_timeout_secs: f64,
}

fn default_api_url() -> String {
    ServerConfig::production().api
}

fn default_harmony_url() -> String {
    ServerConfig::production().harmony
}

fn default_convey_url() -> String {
    ServerConfig::production().convey
}

fn default_prefer_msgpack() -> bool {
    true
}

fn default_heartbeat_interval_secs() -> f64 {
    15.0
}

fn default_heartbeat_timeout_secs() -> f64 {
    3.0
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: default_api_url(),
            harmony_url: default_harmony_url(),
            convey_url: default_convey_url(),
            prefer_msgpack: default_prefer_msgpack(),
            heartbeat_interval_secs: default_heartbeat_interval_secs(),
            heartbeat_timeout_secs: default_heartbeat_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from `ADAPT_`-prefixed environment variables
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Missing .env is fine
        let _ = dotenvy::dotenv();

        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("ADAPT").try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Point this configuration at a different deployment
    #[must_use]
    pub fn with_server(mut self, server: &ServerConfig) -> Self {
        self.api_url.clone_from(&server.api);
        self.harmony_url.clone_from(&server.harmony);
        self.convey_url.clone_from(&server.convey);
        self
    }

    /// Set the authentication token
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// The server catalog this configuration points at
    #[must_use]
    pub fn server(&self) -> ServerConfig {
        ServerConfig {
            api: self.api_url.clone(),
            harmony: self.harmony_url.clone(),
            convey: self.convey_url.clone(),
        }
    }

    /// The token, or an error when none is configured
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.token.as_deref().ok_or(ConfigError::MissingToken)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no authentication token configured (set ADAPT_TOKEN or log in)")]
    MissingToken,
    #[error("invalid configuration: {0}")]
    Invalid(#[from] config::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_production() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "https://api.adapt.chat");
        assert!(config.prefer_msgpack);
        assert!((config.heartbeat_interval_secs - 15.0).abs() < f64::EPSILON);
        assert!((config.heartbeat_timeout_secs - 3.0).abs() < f64::EPSILON);
        assert!(config.require_token().is_err());
    }

    #[test]
    fn test_with_server_rewrites_all_urls() {
        let config = ClientConfig::default().with_server(&ServerConfig::local());
        assert!(config.api_url.ends_with(":8077"));
        assert!(config.harmony_url.starts_with("ws://"));
        assert_eq!(config.server(), ServerConfig::local());
    }

    #[test]
    fn test_with_token() {
        let config = ClientConfig::default().with_token("abc.def");
        assert_eq!(config.require_token().unwrap(), "abc.def");
    }
}
