//! Adapt server address catalog
//!
//! Adapt is three services: the REST API, harmony (the websocket gateway),
//! and convey (the CDN). A `ServerConfig` names all three so the whole
//! client can be pointed at production, a local stack, or anything else.

use serde::{Deserialize, Serialize};

/// Base URLs for one Adapt deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// REST API base URL
    pub api: String,
    /// Gateway (websocket) URL
    pub harmony: String,
    /// CDN base URL
    pub convey: String,
}

impl ServerConfig {
    /// The production Adapt deployment
    #[must_use]
    pub fn production() -> Self {
        Self {
            api: "https://api.adapt.chat".to_string(),
            harmony: "wss://harmony.adapt.chat".to_string(),
            convey: "https://convey.adapt.chat".to_string(),
        }
    }

    /// A local development stack on the standard ports
    #[must_use]
    pub fn local() -> Self {
        Self {
            api: "http://127.0.0.1:8077".to_string(),
            harmony: "ws://127.0.0.1:8076".to_string(),
            convey: "http://127.0.0.1:8078".to_string(),
        }
    }

    /// Replace the API base URL
    #[must_use]
    pub fn with_api(mut self, url: impl Into<String>) -> Self {
        self.api = url.into();
        self
    }

    /// Replace the gateway URL
    #[must_use]
    pub fn with_harmony(mut self, url: impl Into<String>) -> Self {
        self.harmony = url.into();
        self
    }

    /// Replace the CDN base URL
    #[must_use]
    pub fn with_convey(mut self, url: impl Into<String>) -> Self {
        self.convey = url.into();
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::production()
    }
}
