//! terabox-history - recently fetched files
//!
//! Keeps a short, time-bounded history of fetched file records in a
//! synchronous key-value store: newest first, at most N entries (default
//! 10), entries older than 24 hours dropped, one entry per file name.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface argument parsing
//! - [`config`] - Configuration file loading and types
//! - [`error`] - Error types and result helpers
//! - [`filter`] - Fuzzy filtering of history items
//! - [`history`] - History items, expiry and the history store
//! - [`storage`] - Key-value storage backends
//! - [`utils`] - Path utilities
//!
//! # Example
//!
//! ```
//! use terabox_history::history::{FileRecord, HistoryItem, HistoryStore};
//! use terabox_history::storage::MemoryStore;
//!
//! let mut store = HistoryStore::new(MemoryStore::new());
//!
//! let item = HistoryItem::new(FileRecord::new("holiday.mp4").with_field("size", "1.2 GB"));
//! let history = store.add(item, 10).expect("add to history");
//! assert_eq!(history[0].file_name(), "holiday.mp4");
//!
//! let current = store.get_cleaned().expect("read history");
//! assert_eq!(current, history);
//! ```

/// CLI argument definitions.
pub mod cli;

/// Configuration system for loading and merging settings.
pub mod config;

/// Error types and result helpers.
pub mod error;

/// Fuzzy filtering of history items.
pub mod filter;

/// History items, expiry and the history store.
pub mod history;

/// Key-value storage backends.
pub mod storage;

/// Path utilities.
pub mod utils;
