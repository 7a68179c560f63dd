//! Configuration for Kitchen Kompanion.
//!
//! Maps directly to `kompanion.toml`. Every section is optional; missing
//! keys take the defaults below.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KompanionConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Simulated processing latency per request kind.
    #[serde(default)]
    pub latency: LatencyConfig,
    /// Backend selection settings.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Defaults used by the assistant facade.
    #[serde(default)]
    pub assistant: AssistantConfig,
}

impl KompanionConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `KompanionError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::KompanionError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Artificial "processing time" before each result is delivered.
///
/// These are policy constants, not measured costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyConfig {
    /// Recipe suggestions.
    #[serde(default = "default_recipes_ms")]
    pub recipes_ms: u64,
    /// Grocery list.
    #[serde(default = "default_grocery_ms")]
    pub grocery_ms: u64,
    /// Substitutes.
    #[serde(default = "default_substitutes_ms")]
    pub substitutes_ms: u64,
    /// Chat.
    #[serde(default = "default_chat_ms")]
    pub chat_ms: u64,
}

impl LatencyConfig {
    /// No artificial delay at all.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            recipes_ms: 0,
            grocery_ms: 0,
            substitutes_ms: 0,
            chat_ms: 0,
        }
    }

    /// Recipe delay as a [`Duration`].
    #[must_use]
    pub fn recipes(&self) -> Duration {
        Duration::from_millis(self.recipes_ms)
    }

    /// Grocery delay as a [`Duration`].
    #[must_use]
    pub fn grocery(&self) -> Duration {
        Duration::from_millis(self.grocery_ms)
    }

    /// Substitutes delay as a [`Duration`].
    #[must_use]
    pub fn substitutes(&self) -> Duration {
        Duration::from_millis(self.substitutes_ms)
    }

    /// Chat delay as a [`Duration`].
    #[must_use]
    pub fn chat(&self) -> Duration {
        Duration::from_millis(self.chat_ms)
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            recipes_ms: default_recipes_ms(),
            grocery_ms: default_grocery_ms(),
            substitutes_ms: default_substitutes_ms(),
            chat_ms: default_chat_ms(),
        }
    }
}

/// Backend selection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// TOML file holding persisted preferences (`force_mock_ai`, `llm_model_path`).
    /// `None` keeps preferences in memory only.
    #[serde(default)]
    pub preferences_path: Option<PathBuf>,
    /// Minimum available system memory before a model backend is attempted.
    #[serde(default = "default_min_model_memory_mb")]
    pub min_model_memory_mb: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            preferences_path: None,
            min_model_memory_mb: default_min_model_memory_mb(),
        }
    }
}

/// Defaults used when the host application has no better input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// At most this many pantry items are sent with a recipe request.
    #[serde(default = "default_max_pantry_items")]
    pub max_pantry_items: usize,
    /// Meal plan used for pantry-driven grocery lists.
    #[serde(default = "default_meal_plan")]
    pub default_meal_plan: String,
    /// Context passed along with chat questions.
    #[serde(default = "default_chat_context")]
    pub chat_context: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            max_pantry_items: default_max_pantry_items(),
            default_meal_plan: default_meal_plan(),
            chat_context: default_chat_context(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

fn default_log_level() -> String {
    "info".to_string()
}
fn default_recipes_ms() -> u64 {
    1200
}
fn default_grocery_ms() -> u64 {
    1000
}
fn default_substitutes_ms() -> u64 {
    800
}
fn default_chat_ms() -> u64 {
    900
}
fn default_min_model_memory_mb() -> u64 {
    2048
}
fn default_max_pantry_items() -> usize {
    15
}
fn default_meal_plan() -> String {
    "Weekly family meals".to_string()
}
fn default_chat_context() -> String {
    "You are a helpful kitchen assistant.".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = KompanionConfig::from_toml("").unwrap();
        assert_eq!(config, KompanionConfig::default());
        assert_eq!(config.latency.recipes_ms, 1200);
        assert_eq!(config.latency.chat(), Duration::from_millis(900));
        assert_eq!(config.assistant.max_pantry_items, 15);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = KompanionConfig::from_toml(
            r#"
            [latency]
            chat_ms = 10

            [backend]
            preferences_path = "/tmp/kompanion-prefs.toml"
            "#,
        )
        .unwrap();
        assert_eq!(config.latency.chat_ms, 10);
        assert_eq!(config.latency.grocery_ms, 1000);
        assert_eq!(
            config.backend.preferences_path.as_deref(),
            Some(std::path::Path::new("/tmp/kompanion-prefs.toml"))
        );
        assert_eq!(config.backend.min_model_memory_mb, 2048);
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = KompanionConfig::from_toml("[latency\nchat_ms = 1").unwrap_err();
        assert!(matches!(err, crate::KompanionError::Config(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kompanion.toml");
        std::fs::write(&path, "[general]\nlog_level = \"debug\"\n").unwrap();
        let config = KompanionConfig::from_file(&path).unwrap();
        assert_eq!(config.general.log_level, "debug");
    }
}
