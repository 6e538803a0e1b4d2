//! Persisted preferences
//!
//! A tiny key/value store standing in for the browser's local storage.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::LocaleError;

/// Key under which the chosen language code is stored
pub const LANGUAGE_PREFERENCE_KEY: &str = "preferred-language";

pub trait PreferenceStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, LocaleError>;

    fn save(&self, key: &str, value: &str) -> Result<(), LocaleError>;
}

/// Volatile store, lost when dropped
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>, LocaleError> {
        let values = self
            .values
            .read()
            .map_err(|e| LocaleError::Storage(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), LocaleError> {
        let mut values = self
            .values
            .write()
            .map_err(|e| LocaleError::Storage(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object on disk, rewritten on every save
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    /// `<config dir>/careprep/preferences.json`, or the working directory
    /// when the platform has no config dir
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("careprep").join("preferences.json"))
            .unwrap_or_else(|| PathBuf::from("./careprep_preferences.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File content, `None` when missing or blank
    fn read_raw(&self) -> Result<Option<String>, LocaleError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(None),
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn read_all(&self) -> Result<HashMap<String, String>, LocaleError> {
        match self.read_raw()? {
            Some(content) => Ok(serde_json::from_str(&content)?),
            None => Ok(HashMap::new()),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>, LocaleError> {
        let _guard = self
            .lock
            .read()
            .map_err(|e| LocaleError::Storage(e.to_string()))?;
        Ok(self.read_all()?.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), LocaleError> {
        let _guard = self
            .lock
            .write()
            .map_err(|e| LocaleError::Storage(e.to_string()))?;

        // A corrupt file is replaced rather than blocking every later save
        let mut values: HashMap<String, String> = match self.read_raw()? {
            Some(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Overwriting unreadable preferences file"
                );
                HashMap::new()
            }),
            None => HashMap::new(),
        };
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        Ok(())
    }
}
