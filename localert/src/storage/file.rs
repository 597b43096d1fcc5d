//! File-backed key-value store.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::KeyValueStore;

/// Persists keys as one JSON object in a single file.
///
/// The file is read once on open and rewritten on every mutation. All IO
/// failures are logged and swallowed: a missing or corrupt file opens as an
/// empty store, and a failed write keeps the in-memory value so the session
/// still behaves correctly.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: RwLock<HashMap<String, String>>,
}

impl FileStore {
    /// Open (or create on first write) the store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = load(&path);
        Self {
            path,
            values: RwLock::new(values),
        }
    }

    fn persist(&self, values: &HashMap<String, String>) {
        let json = match serde_json::to_string_pretty(values) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize store");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = fs::create_dir_all(parent) {
                    tracing::error!(error = %e, path = %self.path.display(), "Failed to create store directory");
                    return;
                }
            }
        }
        if let Err(e) = fs::write(&self.path, json) {
            tracing::error!(error = %e, path = %self.path.display(), "Failed to write store");
        }
    }
}

/// Best-effort load; anything unreadable yields an empty map.
fn load(path: &Path) -> HashMap<String, String> {
    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "Corrupt store file, starting empty");
                HashMap::new()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "Unreadable store file, starting empty");
            HashMap::new()
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut values = self.values.write().unwrap();
        values.insert(key.to_string(), value.to_string());
        self.persist(&values);
    }

    fn remove(&self, key: &str) {
        let mut values = self.values.write().unwrap();
        if values.remove(key).is_some() {
            self.persist(&values);
        }
    }
}
