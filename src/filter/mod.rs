//! Filter module for terabox-history.
//!
//! Provides fuzzy matching and filtering of history items by file name.

mod fuzzy;

pub use fuzzy::{filter_items, ItemMatcher};
