//! File-backed key-value store.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::KeyValueStore;
use crate::error::{HistoryError, Result};

/// A JSON object file mapping keys to string values.
///
/// Every `get` re-reads the file and every `set` rewrites it, so separate
/// processes sharing the file see last-write-wins behavior.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the backup file path used for corrupt files.
    fn backup_path(&self) -> PathBuf {
        self.path.with_extension("json.bak")
    }

    /// Read all entries.
    ///
    /// Handles a missing file gracefully (returns no entries).
    /// Handles a corrupt file by backing it up and returning no entries.
    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(HistoryError::storage("read", &self.path, e)),
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        match serde_json::from_str::<BTreeMap<String, String>>(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "storage file is corrupt, backing up and starting fresh"
                );

                let backup_path = self.backup_path();
                match fs::rename(&self.path, &backup_path) {
                    Ok(()) => warn!(backup = %backup_path.display(), "corrupt storage backed up"),
                    Err(backup_err) => {
                        warn!(error = %backup_err, "failed to back up corrupt storage file")
                    }
                }

                Ok(BTreeMap::new())
            }
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| HistoryError::storage("create directory", parent, e))?;
            }
        }

        let content = serde_json::to_string_pretty(entries)?;

        fs::write(&self.path, content).map_err(|e| HistoryError::storage("write", &self.path, e))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.read_entries()?;
        Ok(entries.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)?;
        debug!(path = %self.path.display(), key, bytes = value.len(), "storage written");
        Ok(())
    }
}
