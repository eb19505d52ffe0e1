//! History item types.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Metadata for a fetched file.
///
/// Only `file_name` is interpreted. Every other attribute the fetcher
/// produced (size, remote path, download link, ...) is kept verbatim so a
/// stored list round-trips without losing fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// File name, used as the dedup key.
    #[serde(default, deserialize_with = "lenient_text")]
    pub file_name: String,
    /// All remaining metadata fields.
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl FileRecord {
    /// Create a record with only a file name.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            metadata: Map::new(),
        }
    }

    /// Add a metadata field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Get a metadata field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// Get a metadata field rendered as display text.
    ///
    /// Strings are returned without quotes, other JSON values in their
    /// compact JSON form.
    pub fn field_text(&self, key: &str) -> Option<String> {
        self.metadata.get(key).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

/// A file record plus the time it was fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// The fetched file.
    #[serde(flatten)]
    pub file: FileRecord,
    /// ISO-8601 fetch timestamp, kept as stored.
    ///
    /// A missing or non-text value reads as an empty (unparseable) string,
    /// except a number, which is taken as epoch milliseconds.
    #[serde(rename = "fetchedAt", default, deserialize_with = "timestamp_text")]
    pub fetched_at: String,
}

impl HistoryItem {
    /// Create an item fetched now.
    pub fn new(file: FileRecord) -> Self {
        Self::fetched_at(file, Utc::now())
    }

    /// Create an item with a specific fetch time.
    pub fn fetched_at(file: FileRecord, at: DateTime<Utc>) -> Self {
        Self {
            file,
            fetched_at: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Create an item with a raw timestamp string (may be unparseable).
    pub fn with_raw_timestamp(file: FileRecord, fetched_at: impl Into<String>) -> Self {
        Self {
            file,
            fetched_at: fetched_at.into(),
        }
    }

    /// The dedup key.
    pub fn file_name(&self) -> &str {
        &self.file.file_name
    }

    /// Parse `fetched_at`, returning `None` if it is not a recognizable timestamp.
    pub fn fetched_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.fetched_at)
    }
}

/// Read any JSON value as text. `null` becomes empty.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn timestamp_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_default(),
        _ => String::new(),
    })
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 with an offset, a date-time without offset (taken as
/// UTC), and a bare `YYYY-MM-DD` date (UTC midnight).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
