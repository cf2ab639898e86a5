//! Client configuration
//!
//! Settings are read from `config.toml` in the platform config directory,
//! with the server address overridable through `NOVA_SERVER_URL`.

use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Environment variable that overrides the configured server address.
pub const SERVER_URL_ENV: &str = "NOVA_SERVER_URL";

/// Configuration for the Nova Desk client
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the assistant backend
    pub server_url: String,

    /// Whether to announce responses through the speech engine
    pub speak_responses: bool,

    /// Whether to open `open_url` responses in the system browser
    pub open_links: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".to_string(),
            speak_responses: true,
            open_links: true,
        }
    }
}

impl ClientConfig {
    /// Load the configuration from disk, falling back to defaults.
    ///
    /// A malformed config file is logged and ignored rather than aborting
    /// startup.
    pub fn load() -> Self {
        let mut config = match Self::config_path() {
            Some(path) => match std::fs::read_to_string(&path) {
                Ok(contents) => match Self::parse(&contents) {
                    Ok(config) => {
                        debug!("Loaded config from {:?}", path);
                        config
                    }
                    Err(e) => {
                        warn!("Ignoring malformed config at {:?}: {}", path, e);
                        Self::default()
                    }
                },
                Err(_) => Self::default(),
            },
            None => Self::default(),
        };

        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            if !url.trim().is_empty() {
                config.server_url = url;
            }
        }

        config
    }

    /// Parse a configuration from TOML text.
    pub fn parse(contents: &str) -> crate::Result<Self> {
        toml::from_str(contents).map_err(|e| crate::NovaError::ConfigError(e.to_string()))
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("nova-desk").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.server_url, "http://127.0.0.1:5000");
        assert!(config.speak_responses);
        assert!(config.open_links);
    }

    #[test]
    fn test_parse_partial() {
        let config = ClientConfig::parse("server_url = \"http://nova.local:8080\"").unwrap();
        assert_eq!(config.server_url, "http://nova.local:8080");
        // Unspecified fields keep their defaults
        assert!(config.speak_responses);
    }

    #[test]
    fn test_parse_full() {
        let config = ClientConfig::parse(
            "server_url = \"https://assistant.example.com\"\n\
             speak_responses = false\n\
             open_links = false\n",
        )
        .unwrap();
        assert_eq!(config.server_url, "https://assistant.example.com");
        assert!(!config.speak_responses);
        assert!(!config.open_links);
    }

    #[test]
    fn test_parse_malformed() {
        assert!(ClientConfig::parse("server_url = [not a string]").is_err());
    }
}
