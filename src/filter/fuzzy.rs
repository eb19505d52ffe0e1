//! Fuzzy matching over history file names.
//!
//! Uses SkimMatcherV2 for fuzzy matching with scoring.

use std::sync::OnceLock;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher as FuzzyMatcherTrait;

use crate::config::FilterConfig;
use crate::history::HistoryItem;

/// Global matcher instance, initialized once and reused across calls.
static GLOBAL_MATCHER: OnceLock<SkimMatcherV2> = OnceLock::new();

fn global_matcher() -> &'static SkimMatcherV2 {
    GLOBAL_MATCHER.get_or_init(SkimMatcherV2::default)
}

/// Matcher for history items.
#[derive(Debug, Clone, Copy)]
pub struct ItemMatcher {
    case_sensitive: bool,
    fuzzy: bool,
}

impl ItemMatcher {
    /// Create a new case-insensitive fuzzy matcher.
    pub fn new() -> Self {
        Self {
            case_sensitive: false,
            fuzzy: true,
        }
    }

    /// Create a matcher from filter configuration.
    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new()
            .case_sensitive(config.case_sensitive)
            .fuzzy(config.fuzzy)
    }

    /// Set case sensitivity.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Use fuzzy matching (otherwise plain substring matching).
    pub fn fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    /// Match an item's file name against a query.
    ///
    /// Returns a score if the item matches, or None if it doesn't.
    /// Substring matches score 0.
    pub fn match_item(&self, item: &HistoryItem, query: &str) -> Option<i64> {
        if query.is_empty() {
            return Some(0);
        }

        let (name, query) = if self.case_sensitive {
            (item.file_name().to_string(), query.to_string())
        } else {
            (item.file_name().to_lowercase(), query.to_lowercase())
        };

        if self.fuzzy {
            global_matcher().fuzzy_match(&name, &query)
        } else {
            name.contains(&query).then_some(0)
        }
    }

    /// Score every item against `query`.
    ///
    /// Returns (index, score) pairs, best first. Items with equal scores
    /// keep their history order.
    pub fn filter(&self, items: &[HistoryItem], query: &str) -> Vec<(usize, i64)> {
        let mut matches: Vec<(usize, i64)> = items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| self.match_item(item, query).map(|score| (idx, score)))
            .collect();

        matches.sort_by(|a, b| b.1.cmp(&a.1));

        matches
    }
}

impl Default for ItemMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Filter items by file name using the configured matching mode.
///
/// Returns (index, score) pairs sorted by score descending; ties keep their
/// original order. An empty query returns every item with score 0.
///
/// # Examples
///
/// ```
/// use terabox_history::config::FilterConfig;
/// use terabox_history::filter::filter_items;
/// use terabox_history::history::{FileRecord, HistoryItem};
///
/// let items = vec![
///     HistoryItem::new(FileRecord::new("holiday.mp4")),
///     HistoryItem::new(FileRecord::new("report.pdf")),
/// ];
///
/// let results = filter_items("rpt", &items, &FilterConfig::default());
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].0, 1);
/// ```
pub fn filter_items(
    query: &str,
    items: &[HistoryItem],
    config: &FilterConfig,
) -> Vec<(usize, i64)> {
    ItemMatcher::from_config(config).filter(items, query)
}
