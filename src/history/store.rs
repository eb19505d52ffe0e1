//! History storage and expiry.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::item::HistoryItem;
use crate::config::HistoryConfig;
use crate::error::{HistoryError, Result};
use crate::storage::KeyValueStore;

/// Storage key holding the serialized history list.
pub const HISTORY_KEY: &str = "terabox-history";

/// Default maximum number of items kept by [`HistoryStore::add`].
pub const DEFAULT_MAX_ITEMS: usize = 10;

/// Default lifetime of a history item, in hours.
pub const DEFAULT_TTL_HOURS: i64 = 24;

/// What to do when the stored value is present but not a valid list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptPolicy {
    /// Back up the raw value, log a warning and continue with an empty list.
    #[default]
    Reset,
    /// Return [`HistoryError::CorruptHistory`] to the caller.
    Fail,
}

/// Remove items fetched 24 hours or more before `now`, and items whose
/// timestamp cannot be parsed.
pub fn expire(items: Vec<HistoryItem>, now: DateTime<Utc>) -> Vec<HistoryItem> {
    expire_with_ttl(items, now, Duration::hours(DEFAULT_TTL_HOURS))
}

/// Keep only items fetched strictly after `now - ttl`, preserving order.
///
/// Items whose timestamp cannot be parsed (missing, empty, or not a
/// recognizable date) are dropped.
pub fn expire_with_ttl(
    items: Vec<HistoryItem>,
    now: DateTime<Utc>,
    ttl: Duration,
) -> Vec<HistoryItem> {
    let cutoff = now - ttl;

    items
        .into_iter()
        .filter(|item| match item.fetched_time() {
            Some(at) => at > cutoff,
            None => {
                debug!(
                    file_name = item.file_name(),
                    fetched_at = %item.fetched_at,
                    "dropping history item with unparseable timestamp"
                );
                false
            }
        })
        .collect()
}

/// A list read back from storage.
struct Loaded {
    items: Vec<HistoryItem>,
    /// Number of entries in the stored array, readable or not.
    stored: usize,
    /// The stored value was corrupt and has been discarded.
    reset: bool,
}

/// Time-bounded, deduplicated history kept in one key-value slot.
#[derive(Debug)]
pub struct HistoryStore<S> {
    storage: S,
    key: String,
    ttl: Duration,
    on_corrupt: CorruptPolicy,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Create a store using the default key, TTL and corrupt-data policy.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            key: HISTORY_KEY.to_string(),
            ttl: Duration::hours(DEFAULT_TTL_HOURS),
            on_corrupt: CorruptPolicy::default(),
        }
    }

    /// Create a store from history configuration.
    pub fn with_config(storage: S, config: &HistoryConfig) -> Self {
        Self::new(storage)
            .key(&config.key)
            .ttl(Duration::hours(config.ttl_hours))
            .on_corrupt(config.on_corrupt)
    }

    /// Set the storage key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Set how long items live.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the corrupt-data policy.
    pub fn on_corrupt(mut self, policy: CorruptPolicy) -> Self {
        self.on_corrupt = policy;
        self
    }

    /// The storage key in use.
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Borrow the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store, returning the underlying storage.
    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Key the raw value of a corrupt slot is copied to.
    pub fn backup_key(&self) -> String {
        format!("{}.bak", self.key)
    }

    /// Apply this store's TTL to `items`.
    pub fn expire_at(&self, items: Vec<HistoryItem>, now: DateTime<Utc>) -> Vec<HistoryItem> {
        expire_with_ttl(items, now, self.ttl)
    }

    /// Add an item fetched now. See [`HistoryStore::add_at`].
    pub fn add(&mut self, item: HistoryItem, max_items: usize) -> Result<Vec<HistoryItem>> {
        self.add_at(item, max_items, Utc::now())
    }

    /// Add an item, expiring old entries and replacing any entry with the
    /// same file name.
    ///
    /// The new item goes first and the list is cut to `max_items`. The
    /// result is written back and returned.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::InvalidMaxItems`] if `max_items` is zero, and
    /// propagates storage and (under [`CorruptPolicy::Fail`]) parse errors.
    pub fn add_at(
        &mut self,
        item: HistoryItem,
        max_items: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<HistoryItem>> {
        if max_items == 0 {
            return Err(HistoryError::InvalidMaxItems);
        }

        let existing = self.load()?.map(|l| l.items).unwrap_or_default();
        let mut history: Vec<HistoryItem> = self
            .expire_at(existing, now)
            .into_iter()
            .filter(|h| h.file_name() != item.file_name())
            .collect();

        history.insert(0, item);
        history.truncate(max_items);

        self.save(&history)?;
        debug!(key = %self.key, len = history.len(), "history item added");

        Ok(history)
    }

    /// Read the history with expired items removed. See
    /// [`HistoryStore::get_cleaned_at`].
    pub fn get_cleaned(&mut self) -> Result<Vec<HistoryItem>> {
        self.get_cleaned_at(Utc::now())
    }

    /// Read the history with expired items removed.
    ///
    /// Writes back only when something was removed (or a corrupt value was
    /// discarded). An absent slot returns an empty list without writing.
    pub fn get_cleaned_at(&mut self, now: DateTime<Utc>) -> Result<Vec<HistoryItem>> {
        let Some(loaded) = self.load()? else {
            return Ok(Vec::new());
        };

        let cleaned = self.expire_at(loaded.items, now);

        if loaded.reset || cleaned.len() != loaded.stored {
            debug!(
                key = %self.key,
                removed = loaded.stored - cleaned.len(),
                "writing cleaned history"
            );
            self.save(&cleaned)?;
        }

        Ok(cleaned)
    }

    /// Read and parse the slot. `None` means the slot is absent or empty.
    fn load(&mut self) -> Result<Option<Loaded>> {
        let raw = match self.storage.get(&self.key)? {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(None),
        };

        // Entries are decoded one by one so a single bad entry only drops itself
        let entries = match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(entries) => entries,
            Err(source) => return self.discard_corrupt(&raw, source),
        };

        let stored = entries.len();
        let items = entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<HistoryItem>(entry) {
                Ok(item) => Some(item),
                Err(error) => {
                    debug!(key = %self.key, %error, "dropping unreadable history entry");
                    None
                }
            })
            .collect();

        Ok(Some(Loaded {
            items,
            stored,
            reset: false,
        }))
    }

    /// Apply the corrupt-data policy to a value that is not a JSON array.
    fn discard_corrupt(
        &mut self,
        raw: &str,
        source: serde_json::Error,
    ) -> Result<Option<Loaded>> {
        match self.on_corrupt {
            CorruptPolicy::Fail => Err(HistoryError::CorruptHistory {
                key: self.key.clone(),
                source,
            }),
            CorruptPolicy::Reset => {
                let backup_key = self.backup_key();
                warn!(
                    key = %self.key,
                    backup = %backup_key,
                    error = %source,
                    "stored history is corrupt, backing up and starting fresh"
                );
                self.storage.set(&backup_key, raw)?;
                Ok(Some(Loaded {
                    items: Vec::new(),
                    stored: 0,
                    reset: true,
                }))
            }
        }
    }

    fn save(&mut self, items: &[HistoryItem]) -> Result<()> {
        let encoded = serde_json::to_string(items)?;
        self.storage.set(&self.key, &encoded)
    }
}
