/// Configuration schema and defaults for phishscan.
///
/// Defines the TOML-serializable configuration structure with all sections:
/// `[endpoint]`, `[storage]`, `[logging]`, and `[web]`.
///
/// Every field has a sensible built-in default. Users only need to set the
/// values they want to override.
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default prediction endpoint (the local classification service).
pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:5000/predict";

/// Storage key the scan history is persisted under.
pub const DEFAULT_HISTORY_KEY: &str = "phishingDetectorHistory";

/// Default bind address for `phishscan web`.
pub const DEFAULT_WEB_ADDR: &str = "127.0.0.1:9747";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level phishscan configuration.
///
/// Maps directly to the `~/.phishscan/config.toml` and `.phishscan.toml`
/// file schemas. All sections and fields are optional; missing values fall
/// back to built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhishscanConfig {
    pub endpoint: EndpointConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub web: WebConfig,
}

// ---------------------------------------------------------------------------
// [endpoint]
// ---------------------------------------------------------------------------

/// Prediction service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Full URL of the prediction route (POST target).
    pub url: String,
    /// Request timeout in milliseconds. `0` leaves the transport default in
    /// place, which means a request may stay pending indefinitely.
    pub timeout_ms: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINT_URL.to_string(),
            timeout_ms: 0,
        }
    }
}

impl EndpointConfig {
    /// The configured timeout, or `None` when unset.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

// ---------------------------------------------------------------------------
// [storage]
// ---------------------------------------------------------------------------

/// Local persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the key-value files and the event log.
    /// Empty means `~/.phishscan`.
    pub dir: String,
    /// Key the history list is stored under.
    pub history_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: String::new(),
            history_key: DEFAULT_HISTORY_KEY.to_string(),
        }
    }
}

impl StorageConfig {
    /// Resolve the storage directory, falling back to `~/.phishscan`.
    pub fn resolved_dir(&self) -> Option<PathBuf> {
        if self.dir.trim().is_empty() {
            dirs::home_dir().map(|home| home.join(".phishscan"))
        } else {
            Some(PathBuf::from(&self.dir))
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Event log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write scan events to `<storage dir>/events.jsonl`.
    pub enabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ---------------------------------------------------------------------------
// [web]
// ---------------------------------------------------------------------------

/// Browser surface settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub addr: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_WEB_ADDR.to_string(),
        }
    }
}

impl PhishscanConfig {
    /// Annotated default config written by `phishscan config init`.
    pub fn default_toml() -> String {
        r#"# phishscan configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (PHISHSCAN_*)
#   2. Project config (.phishscan.toml in current directory)
#   3. User global config (~/.phishscan/config.toml)
#   4. Built-in defaults

[endpoint]
url = "http://127.0.0.1:5000/predict"
timeout_ms = 0                        # 0 = no explicit timeout

[storage]
dir = ""                              # empty = ~/.phishscan
history_key = "phishingDetectorHistory"

[logging]
enabled = true                        # events.jsonl in the storage dir

[web]
addr = "127.0.0.1:9747"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = PhishscanConfig::default();
        assert_eq!(config.endpoint.url, "http://127.0.0.1:5000/predict");
        assert_eq!(config.endpoint.timeout_ms, 0);
        assert!(config.endpoint.timeout().is_none());
        assert_eq!(config.storage.history_key, "phishingDetectorHistory");
        assert!(config.logging.enabled);
        assert_eq!(config.web.addr, "127.0.0.1:9747");
    }

    #[test]
    fn deserialize_minimal_toml() {
        let toml_str = r#"
[endpoint]
timeout_ms = 2500
"#;
        let config: PhishscanConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.endpoint.timeout(), Some(Duration::from_millis(2500)));
        // Everything else falls back to defaults
        assert_eq!(config.endpoint.url, DEFAULT_ENDPOINT_URL);
        assert_eq!(config.storage.history_key, DEFAULT_HISTORY_KEY);
    }

    #[test]
    fn explicit_storage_dir_is_used_verbatim() {
        let storage = StorageConfig {
            dir: "/tmp/phishscan-data".to_string(),
            ..StorageConfig::default()
        };
        assert_eq!(
            storage.resolved_dir(),
            Some(PathBuf::from("/tmp/phishscan-data"))
        );
    }

    #[test]
    fn default_toml_parses_back() {
        let config: PhishscanConfig = toml::from_str(&PhishscanConfig::default_toml()).unwrap();
        assert_eq!(config.endpoint.url, DEFAULT_ENDPOINT_URL);
        assert_eq!(config.web.addr, DEFAULT_WEB_ADDR);
        assert!(config.logging.enabled);
    }
}
