// src/config/env.rs
// Environment-based configuration - single source of truth for all env vars

use crate::error::ConfigError;
use crate::proxy::DEFAULT_MODEL;
use tracing::debug;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// Settings read from the process environment
#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// Proxy credential (GEMINI_API_KEY). Never logged.
    pub gemini_api_key: Option<String>,
    /// ROOTMATE_GEMINI_MODEL
    pub gemini_model: String,
    /// Where clients send generation requests (ROOTMATE_BACKEND_URL)
    pub backend_url: Option<String>,
    /// ROOTMATE_HOST
    pub host: String,
    /// ROOTMATE_PORT
    pub port: u16,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            backend_url: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl EnvConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match read("ROOTMATE_PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "ROOTMATE_PORT",
                reason: format!("'{raw}' is not a port number"),
            })?,
            None => DEFAULT_PORT,
        };

        let config = Self {
            gemini_api_key: read("GEMINI_API_KEY"),
            gemini_model: read("ROOTMATE_GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            backend_url: read("ROOTMATE_BACKEND_URL"),
            host: read("ROOTMATE_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        };
        config.log_status();
        Ok(config)
    }

    /// The proxy credential, or a startup error naming the variable
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.gemini_api_key
            .as_deref()
            .ok_or(ConfigError::Missing("GEMINI_API_KEY"))
    }

    fn log_status(&self) {
        if self.gemini_api_key.is_some() {
            debug!(model = %self.gemini_model, "Gemini credential loaded");
        } else {
            debug!("GEMINI_API_KEY not set - the proxy cannot generate messages");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = EnvConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.gemini_model, "gemini-2.5-flash-lite");
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(matches!(config.require_api_key(), Err(ConfigError::Missing("GEMINI_API_KEY"))));
    }

    #[test]
    fn test_empty_key_is_unset() {
        let config = EnvConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")])).unwrap();
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn test_reads_values() {
        let config = EnvConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "secret"),
            ("ROOTMATE_GEMINI_MODEL", "gemini-2.5-flash"),
            ("ROOTMATE_BACKEND_URL", "https://plants.example.com"),
            ("ROOTMATE_PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(config.require_api_key().unwrap(), "secret");
        assert_eq!(config.gemini_model, "gemini-2.5-flash");
        assert_eq!(config.backend_url.as_deref(), Some("https://plants.example.com"));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_bad_port() {
        let err = EnvConfig::from_lookup(lookup(&[("ROOTMATE_PORT", "http")])).unwrap_err();
        assert!(err.to_string().contains("ROOTMATE_PORT"));
    }
}
