//! Configuration type definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::history::{CorruptPolicy, DEFAULT_MAX_ITEMS, DEFAULT_TTL_HOURS, HISTORY_KEY};

/// History configuration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Max items kept after each add.
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    /// Hours an item stays in the history.
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: i64,
    /// Storage key holding the list.
    #[serde(default = "default_key")]
    pub key: String,
    /// Handling of a stored value that is not a valid list.
    #[serde(default)]
    pub on_corrupt: CorruptPolicy,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            ttl_hours: DEFAULT_TTL_HOURS,
            key: HISTORY_KEY.to_string(),
            on_corrupt: CorruptPolicy::default(),
        }
    }
}

/// Storage backend settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the storage file (default: platform data directory).
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Filter configuration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Enable fuzzy matching.
    #[serde(default = "default_true")]
    pub fuzzy: bool,
    /// Case sensitive search.
    #[serde(default)]
    pub case_sensitive: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            fuzzy: true,
            case_sensitive: false,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// History settings.
    #[serde(default)]
    pub history: HistoryConfig,
    /// Storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Filter settings.
    #[serde(default)]
    pub filter: FilterConfig,
}

/// History settings as written in one config file. Unset keys are `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HistoryLayer {
    pub max_items: Option<usize>,
    pub ttl_hours: Option<i64>,
    pub key: Option<String>,
    pub on_corrupt: Option<CorruptPolicy>,
}

/// Filter settings as written in one config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FilterLayer {
    pub fuzzy: Option<bool>,
    pub case_sensitive: Option<bool>,
}

/// The contents of a single config file.
///
/// Layers are merged into a [`Config`] key by key, so a file only
/// overrides what it actually sets.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigLayer {
    #[serde(default)]
    pub history: HistoryLayer,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub filter: FilterLayer,
}

impl Config {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the config file path for the user's home directory.
    pub fn user_config_path() -> Option<PathBuf> {
        crate::utils::global_config_file()
    }

    /// Merge a config file layer into this one (the layer wins for keys it sets).
    pub fn merge(&mut self, layer: ConfigLayer) {
        let ConfigLayer {
            history,
            storage,
            filter,
        } = layer;

        if let Some(max_items) = history.max_items {
            self.history.max_items = max_items;
        }
        if let Some(ttl_hours) = history.ttl_hours {
            self.history.ttl_hours = ttl_hours;
        }
        if let Some(key) = history.key {
            self.history.key = key;
        }
        if let Some(on_corrupt) = history.on_corrupt {
            self.history.on_corrupt = on_corrupt;
        }

        if storage.path.is_some() {
            self.storage.path = storage.path;
        }

        if let Some(fuzzy) = filter.fuzzy {
            self.filter.fuzzy = fuzzy;
        }
        if let Some(case_sensitive) = filter.case_sensitive {
            self.filter.case_sensitive = case_sensitive;
        }
    }

    /// Check value ranges.
    ///
    /// Returns a description of the first invalid value found.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.history.max_items == 0 {
            return Err("history.max_items must be at least 1".to_string());
        }
        if self.history.ttl_hours < 1 {
            return Err("history.ttl_hours must be at least 1".to_string());
        }
        // Keeps `Duration::hours` well within range.
        if self.history.ttl_hours > 24 * 365 * 100 {
            return Err("history.ttl_hours is too large".to_string());
        }
        if self.history.key.trim().is_empty() {
            return Err("history.key must not be empty".to_string());
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_max_items() -> usize {
    DEFAULT_MAX_ITEMS
}

fn default_ttl_hours() -> i64 {
    DEFAULT_TTL_HOURS
}

fn default_key() -> String {
    HISTORY_KEY.to_string()
}
