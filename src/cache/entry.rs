//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with sliding-window
//! TTL support.

use std::time::{Duration, Instant};

use serde_json::Value;

// == Cache Entry ==
/// A single cached value with its access metadata.
///
/// Entries are owned exclusively by their store and never leave its lock;
/// values are cloned out on read.
#[derive(Debug, Clone)]
pub(crate) struct CacheEntry {
    /// The stored payload
    pub value: Value,
    /// When the value was last written
    pub inserted_at: Instant,
    /// When the entry was last written or successfully read
    pub last_access_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry with both timestamps set to now.
    pub fn new(value: Value) -> Self {
        let now = Instant::now();
        Self {
            value,
            inserted_at: now,
            last_access_at: now,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived `ttl`.
    ///
    /// Expiry is a sliding window: the clock restarts on every successful
    /// read, so only entries idle for longer than `ttl` are stale. The
    /// boundary is exclusive - an entry idle for exactly `ttl` is still live.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.last_access_at.elapsed() > ttl
    }

    // == Touch ==
    /// Marks the entry as just accessed.
    pub fn touch(&mut self) {
        self.last_access_at = Instant::now();
    }

    // == Replace ==
    /// Overwrites the value and resets both timestamps, as if the entry had
    /// been freshly inserted.
    pub fn replace(&mut self, value: Value) {
        let now = Instant::now();
        self.value = value;
        self.inserted_at = now;
        self.last_access_at = now;
    }
}

// == Utility Functions ==
/// Returns true when a stored value carries no usable content.
///
/// A cached JSON null, empty string, empty array, or empty object reads as
/// a miss: callers treat such payloads as "nothing fetched yet" and go back
/// to the source of truth.
pub(crate) fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(json!({"id": 42}));

        assert_eq!(entry.value, json!({"id": 42}));
        assert_eq!(entry.inserted_at, entry.last_access_at);
        assert!(!entry.is_expired(Duration::from_secs(60)));
    }

    #[test]
    fn test_entry_expires_after_idle() {
        let entry = CacheEntry::new(json!("payload"));

        sleep(Duration::from_millis(60));

        assert!(entry.is_expired(Duration::from_millis(20)));
        assert!(!entry.is_expired(Duration::from_secs(10)));
    }

    #[test]
    fn test_touch_restarts_the_window() {
        let mut entry = CacheEntry::new(json!("payload"));

        sleep(Duration::from_millis(60));
        entry.touch();

        // The idle window restarted, so a TTL shorter than the total age
        // but longer than the time since touch reports the entry live.
        assert!(!entry.is_expired(Duration::from_millis(40)));
        assert!(entry.inserted_at < entry.last_access_at);
    }

    #[test]
    fn test_replace_resets_both_timestamps() {
        let mut entry = CacheEntry::new(json!(1));

        sleep(Duration::from_millis(30));
        entry.replace(json!(2));

        assert_eq!(entry.value, json!(2));
        assert_eq!(entry.inserted_at, entry.last_access_at);
        assert!(!entry.is_expired(Duration::from_millis(20)));
    }

    #[test]
    fn test_empty_values() {
        assert!(is_empty_value(&Value::Null));
        assert!(is_empty_value(&json!("")));
        assert!(is_empty_value(&json!([])));
        assert!(is_empty_value(&json!({})));
    }

    #[test]
    fn test_non_empty_values() {
        assert!(!is_empty_value(&json!("x")));
        assert!(!is_empty_value(&json!([1])));
        assert!(!is_empty_value(&json!({"a": 1})));
        assert!(!is_empty_value(&json!(0)));
        assert!(!is_empty_value(&json!(false)));
    }
}
