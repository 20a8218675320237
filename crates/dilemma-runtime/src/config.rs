//! Configuration for dilemma-runtime.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::AiModel;
use crate::orchestrator::RuntimeError;

/// Runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuntimeConfig {
    /// Simulated response latency
    #[serde(default)]
    pub latency: LatencyConfig,

    /// Model used when none is requested
    #[serde(default)]
    pub default_model: AiModel,

    /// Key/value store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Determinism configuration
    #[serde(default)]
    pub determinism: DeterminismConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            latency: LatencyConfig::default(),
            default_model: AiModel::default(),
            store: StoreConfig::default(),
            determinism: DeterminismConfig::default(),
        }
    }
}

impl RuntimeConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, RuntimeError> {
        serde_yaml::from_str(yaml).map_err(|e| RuntimeError::Config(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, RuntimeError> {
        serde_json::from_str(json).map_err(|e| RuntimeError::Config(e.to_string()))
    }

    /// Load from a file; `.json` is parsed as JSON, anything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RuntimeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| RuntimeError::Config(format!("{}: {}", path.display(), e)))?;
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Config with latency simulation turned off.
    pub fn without_latency(mut self) -> Self {
        self.latency.enabled = false;
        self
    }
}

/// Latency ranges for the mock model service and analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LatencyConfig {
    /// Whether to sleep at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(with = "humantime_serde", default = "default_chat_min")]
    pub chat_min: Duration,

    #[serde(with = "humantime_serde", default = "default_chat_max")]
    pub chat_max: Duration,

    #[serde(with = "humantime_serde", default = "default_analysis_min")]
    pub analysis_min: Duration,

    #[serde(with = "humantime_serde", default = "default_analysis_max")]
    pub analysis_max: Duration,
}

fn default_true() -> bool {
    true
}

fn default_chat_min() -> Duration {
    Duration::from_secs(1)
}

fn default_chat_max() -> Duration {
    Duration::from_secs(3)
}

fn default_analysis_min() -> Duration {
    Duration::from_secs(2)
}

fn default_analysis_max() -> Duration {
    Duration::from_secs(4)
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            chat_min: default_chat_min(),
            chat_max: default_chat_max(),
            analysis_min: default_analysis_min(),
            analysis_max: default_analysis_max(),
        }
    }
}

/// Key/value store configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// JSON file backing the store
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".dilemma").join("store.json")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Determinism configuration for reproducible analyses.
///
/// When `created_at` is set, analyses are stamped with it instead of the
/// current time, matching the CLI's `--created-at` flag.
///
/// ```yaml
/// determinism:
///   created_at: "2025-12-20T10:00:00Z"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DeterminismConfig {
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// Custom serialization for Duration using humantime format
mod humantime_serde {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RuntimeConfig::default();
        assert!(config.latency.enabled);
        assert_eq!(config.default_model, AiModel::Claude3);
        assert_eq!(config.latency.chat_min, Duration::from_secs(1));
        assert_eq!(config.latency.analysis_max, Duration::from_secs(4));
        assert!(config.determinism.created_at.is_none());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = r#"
latency:
  chat_min: "250ms"
  chat_max: "500ms"
default_model: "gpt-4"
"#;
        let config = RuntimeConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.latency.chat_min, Duration::from_millis(250));
        assert_eq!(config.latency.analysis_min, Duration::from_secs(2));
        assert_eq!(config.default_model, AiModel::Gpt4);
        assert_eq!(config.store.path, PathBuf::from(".dilemma/store.json"));
    }

    #[test]
    fn test_invalid_duration_is_config_error() {
        let yaml = "latency:\n  chat_min: \"soon\"\n";
        assert!(matches!(RuntimeConfig::from_yaml(yaml), Err(RuntimeError::Config(_))));
    }

    #[test]
    fn test_determinism_serialization() {
        use chrono::TimeZone;

        let mut config = RuntimeConfig::default();
        let fixed_time = Utc.with_ymd_and_hms(2025, 12, 20, 10, 0, 0).unwrap();
        config.determinism.created_at = Some(fixed_time);

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("2025-12-20"));

        let parsed = RuntimeConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_without_latency() {
        let config = RuntimeConfig::default().without_latency();
        assert!(!config.latency.enabled);
    }
}
