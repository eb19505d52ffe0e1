//! Test fixtures for storage files and history items.

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use tempfile::TempDir;
use terabox_history::history::{FileRecord, HistoryItem, HISTORY_KEY};
use terabox_history::storage::{FileStore, KeyValueStore};

/// A temporary directory holding a storage file.
pub struct TempStore {
    pub dir: TempDir,
}

impl TempStore {
    /// Create an empty temporary store location (no file yet).
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Path of the storage file.
    pub fn path(&self) -> PathBuf {
        self.dir.path().join("storage.json")
    }

    /// Open a file-backed key-value store on the storage file.
    pub fn open(&self) -> FileStore {
        FileStore::new(self.path())
    }

    /// Write a raw value under the history key.
    pub fn seed_raw(&self, raw: &str) {
        self.open()
            .set(HISTORY_KEY, raw)
            .expect("Failed to seed storage");
    }

    /// Write a list of items under the history key.
    pub fn seed(&self, items: &[HistoryItem]) {
        let raw = serde_json::to_string(items).expect("Failed to serialize items");
        self.seed_raw(&raw);
    }

    /// Read back the raw history value.
    pub fn raw(&self) -> Option<String> {
        self.open().get(HISTORY_KEY).expect("Failed to read storage")
    }

    /// Read back and parse the history list.
    pub fn stored_items(&self) -> Vec<HistoryItem> {
        self.raw()
            .map(|raw| serde_json::from_str(&raw).expect("Stored history is not valid"))
            .unwrap_or_default()
    }
}

/// An item with only a file name, fetched at `at`.
pub fn item_at(name: &str, at: DateTime<Utc>) -> HistoryItem {
    HistoryItem::fetched_at(FileRecord::new(name), at)
}

/// An item fetched `hours` hours before now.
pub fn item_hours_ago(name: &str, hours: i64) -> HistoryItem {
    item_at(name, Utc::now() - Duration::hours(hours))
}

/// A realistic file record with typical metadata fields.
pub fn sample_file(name: &str) -> FileRecord {
    FileRecord::new(name)
        .with_field("size", "24.5 MB")
        .with_field("size_bytes", 25_690_112u64)
        .with_field("path", format!("/shared/{name}"))
        .with_field("download_link", format!("https://example.com/d/{name}"))
}

/// File names of a list, in order.
pub fn names(items: &[HistoryItem]) -> Vec<String> {
    items.iter().map(|i| i.file_name().to_string()).collect()
}
