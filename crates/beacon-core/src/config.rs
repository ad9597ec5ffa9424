//! Configuration for the beacon collector
//!
//! All knobs are read once when a collector is constructed and never
//! re-read: the identifier query-parameter name, the storage key, the
//! collection endpoint, an optional API key, and the transport timeout.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{BeaconError, Result};

/// Collector configuration
///
/// Loaded from a `beacon.toml` file or constructed programmatically. Every
/// field has a default so a bare `CollectorConfig::default()` is a working
/// setup against the standard endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Query parameter carrying the session identifier
    #[serde(default = "default_param_name")]
    pub param_name: String,

    /// Storage key the identity is persisted under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Collection endpoint the wire payload is POSTed to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Bearer token attached as `Authorization` when present
    #[serde(default)]
    pub api_key: Option<String>,

    /// Transport timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Raise collector diagnostics from debug to info
    #[serde(default)]
    pub debug: bool,
}

// Default value providers
fn default_param_name() -> String {
    "session_id".to_string()
}

fn default_storage_key() -> String {
    "beacon_session_id".to_string()
}

fn default_endpoint() -> String {
    "https://collect.example.com/api/page-events".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

impl CollectorConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| BeaconError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Load configuration from a file if one is given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Write the default configuration to a file, for `init`-style tooling
    pub fn write_default(path: &Path) -> Result<()> {
        let config = Self::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| BeaconError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Builder-style override for the endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Builder-style override for the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            param_name: default_param_name(),
            storage_key: default_storage_key(),
            endpoint: default_endpoint(),
            api_key: None,
            timeout_ms: default_timeout_ms(),
            debug: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CollectorConfig::default();
        assert_eq!(config.param_name, "session_id");
        assert_eq!(config.storage_key, "beacon_session_id");
        assert_eq!(config.timeout_ms, 5000);
        assert!(config.api_key.is_none());
        assert!(!config.debug);
    }

    #[test]
    fn test_partial_file_gets_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beacon.toml");
        std::fs::write(&path, "endpoint = \"https://collect.test/events\"\n").unwrap();

        let config = CollectorConfig::load(&path).unwrap();
        assert_eq!(config.endpoint, "https://collect.test/events");
        assert_eq!(config.param_name, "session_id");
        assert_eq!(config.timeout_ms, 5000);
    }

    #[test]
    fn test_write_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beacon.toml");
        CollectorConfig::write_default(&path).unwrap();

        let config = CollectorConfig::load(&path).unwrap();
        assert_eq!(config.endpoint, CollectorConfig::default().endpoint);
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = CollectorConfig::load(Path::new("/nonexistent/beacon.toml"));
        assert!(result.is_err());
    }
}
