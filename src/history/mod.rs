//! History module for terabox-history.
//!
//! Keeps a short, time-bounded list of fetched files in a key-value store,
//! newest first, deduplicated by file name.

mod item;
mod store;

pub use item::{parse_timestamp, FileRecord, HistoryItem};
pub use store::{
    expire, expire_with_ttl, CorruptPolicy, HistoryStore, DEFAULT_MAX_ITEMS, DEFAULT_TTL_HOURS,
    HISTORY_KEY,
};
