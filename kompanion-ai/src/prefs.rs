//! Persisted backend-selection preferences.
//!
//! The store is an external key/value collaborator with two known keys:
//! - `force_mock_ai` (bool, default `false`)
//! - `llm_model_path` (string, reserved for a model backend)
//!
//! Failures surface as [`AiError::ConfigAccess`]; the selection policy
//! treats them as non-fatal.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AiError;

/// Preference key: always use the rule-based backend.
pub const KEY_FORCE_MOCK: &str = "force_mock_ai";

/// Preference key: path of an on-device model file.
pub const KEY_MODEL_PATH: &str = "llm_model_path";

/// Simple typed get/set access to persisted preferences.
pub trait PreferenceStore: Send + Sync {
    /// Read a boolean; `Ok(None)` when unset.
    ///
    /// # Errors
    /// [`AiError::ConfigAccess`] when the store cannot be read or the value
    /// is not a boolean.
    fn get_bool(&self, key: &str) -> Result<Option<bool>, AiError>;

    /// Write a boolean.
    ///
    /// # Errors
    /// [`AiError::ConfigAccess`] when the store cannot be written.
    fn set_bool(&self, key: &str, value: bool) -> Result<(), AiError>;

    /// Read a string; `Ok(None)` when unset.
    ///
    /// # Errors
    /// [`AiError::ConfigAccess`] when the store cannot be read or the value
    /// is not a string.
    fn get_string(&self, key: &str) -> Result<Option<String>, AiError>;

    /// Write a string.
    ///
    /// # Errors
    /// [`AiError::ConfigAccess`] when the store cannot be written.
    fn set_string(&self, key: &str, value: &str) -> Result<(), AiError>;
}

/// A stored preference value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    /// Boolean flag.
    Bool(bool),
    /// Free text.
    Text(String),
}

type PrefMap = BTreeMap<String, PrefValue>;

fn as_bool(key: &str, value: Option<&PrefValue>) -> Result<Option<bool>, AiError> {
    match value {
        None => Ok(None),
        Some(PrefValue::Bool(b)) => Ok(Some(*b)),
        Some(PrefValue::Text(_)) => Err(AiError::ConfigAccess(format!("{key} is not a boolean"))),
    }
}

fn as_string(key: &str, value: Option<&PrefValue>) -> Result<Option<String>, AiError> {
    match value {
        None => Ok(None),
        Some(PrefValue::Text(s)) => Ok(Some(s.clone())),
        Some(PrefValue::Bool(_)) => Err(AiError::ConfigAccess(format!("{key} is not a string"))),
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Volatile store; preferences last as long as the process.
#[derive(Debug, Default)]
pub struct InMemoryPreferences {
    values: RwLock<PrefMap>,
}

impl InMemoryPreferences {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for InMemoryPreferences {
    fn get_bool(&self, key: &str) -> Result<Option<bool>, AiError> {
        as_bool(key, self.values.read().get(key))
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<(), AiError> {
        self.values.write().insert(key.to_owned(), PrefValue::Bool(value));
        Ok(())
    }

    fn get_string(&self, key: &str) -> Result<Option<String>, AiError> {
        as_string(key, self.values.read().get(key))
    }

    fn set_string(&self, key: &str, value: &str) -> Result<(), AiError> {
        self.values
            .write()
            .insert(key.to_owned(), PrefValue::Text(value.to_owned()));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TOML file store
// ---------------------------------------------------------------------------

/// Preferences kept in a flat TOML file.
///
/// Every read goes to disk so external edits are seen. Writes replace the
/// file atomically (write to a sibling temp file, then rename). A missing
/// file reads as empty; a write over an unreadable file starts it afresh.
#[derive(Debug)]
pub struct TomlPreferences {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl TomlPreferences {
    /// Store backed by `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// File location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<PrefMap, AiError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                AiError::ConfigAccess(format!("{}: {e}", self.path.display()))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(PrefMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn update(&self, key: &str, value: PrefValue) -> Result<(), AiError> {
        let _guard = self.write_lock.lock();
        let mut values = self.load().unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Preference file unreadable, rewriting");
            PrefMap::new()
        });
        values.insert(key.to_owned(), value);

        let content =
            toml::to_string(&values).map_err(|e| AiError::ConfigAccess(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), key, "Preference written");
        Ok(())
    }
}

impl PreferenceStore for TomlPreferences {
    fn get_bool(&self, key: &str) -> Result<Option<bool>, AiError> {
        as_bool(key, self.load()?.get(key))
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<(), AiError> {
        self.update(key, PrefValue::Bool(value))
    }

    fn get_string(&self, key: &str) -> Result<Option<String>, AiError> {
        as_string(key, self.load()?.get(key))
    }

    fn set_string(&self, key: &str, value: &str) -> Result<(), AiError> {
        self.update(key, PrefValue::Text(value.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_roundtrip_and_type_checks() {
        let prefs = InMemoryPreferences::new();
        assert_eq!(prefs.get_bool(KEY_FORCE_MOCK).unwrap(), None);

        prefs.set_bool(KEY_FORCE_MOCK, true).unwrap();
        assert_eq!(prefs.get_bool(KEY_FORCE_MOCK).unwrap(), Some(true));
        assert!(matches!(prefs.get_string(KEY_FORCE_MOCK), Err(AiError::ConfigAccess(_))));
    }

    #[test]
    fn toml_file_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.toml");

        let prefs = TomlPreferences::new(&path);
        assert_eq!(prefs.get_bool(KEY_FORCE_MOCK).unwrap(), None);
        prefs.set_bool(KEY_FORCE_MOCK, true).unwrap();
        prefs.set_string(KEY_MODEL_PATH, "/models/tiny.gguf").unwrap();

        let reopened = TomlPreferences::new(&path);
        assert_eq!(reopened.get_bool(KEY_FORCE_MOCK).unwrap(), Some(true));
        assert_eq!(
            reopened.get_string(KEY_MODEL_PATH).unwrap().as_deref(),
            Some("/models/tiny.gguf")
        );

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("force_mock_ai = true"));
    }

    #[test]
    fn corrupt_file_reads_as_error_and_write_recovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "force_mock_ai = [").unwrap();

        let prefs = TomlPreferences::new(&path);
        assert!(matches!(prefs.get_bool(KEY_FORCE_MOCK), Err(AiError::ConfigAccess(_))));

        prefs.set_bool(KEY_FORCE_MOCK, true).unwrap();
        assert_eq!(prefs.get_bool(KEY_FORCE_MOCK).unwrap(), Some(true));
        assert_eq!(prefs.get_string(KEY_MODEL_PATH).unwrap(), None);
        assert!(!std::fs::read_to_string(&path).unwrap().contains('['));
    }
}
