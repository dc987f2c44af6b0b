use std::{
    collections::HashMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::errors::CoreError;

use super::KeyValueStore;

/// File-backed key-value store holding every key in one JSON document.
///
/// Writes stage to a temporary file and rename into place so an interrupted
/// write never leaves a truncated document behind.
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl JsonFileStore {
    /// Opens the store at `path`, creating parent directories as needed.
    /// A missing file starts empty; an unreadable document is reported.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let entries = if path.exists() {
            let data = fs::read_to_string(&path)?;
            serde_json::from_str(&data)?
        } else {
            HashMap::new()
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Opens the store at the default application data location.
    pub fn open_default() -> Result<Self, CoreError> {
        Self::open(crate::utils::data_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &HashMap<String, String>) -> Result<(), CoreError> {
        let tmp = self.path.with_extension("tmp");
        let json = serde_json::to_string_pretty(entries)?;
        let mut file = fs::File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(key.to_string(), value.to_string());
        if let Err(err) = self.flush(&entries) {
            tracing::error!(key, %err, "failed to persist key-value document");
        }
    }
}
