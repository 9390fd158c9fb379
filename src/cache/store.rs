//! Cache Store Module
//!
//! Bounded key/value store with sliding-window TTL expiry, LRU capacity
//! eviction, pattern-based invalidation, and hit/miss statistics.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::entry::{is_empty_value, CacheEntry};
use crate::cache::patterns::{compile_pattern, PatternRegistry};
use crate::cache::CacheStats;
use crate::models::StoreSnapshot;

// == Inner State ==
/// Everything the store's single lock guards: the entry map, the pattern
/// registry, the statistics, and the mutable default TTL.
#[derive(Debug)]
struct StoreInner {
    entries: HashMap<String, CacheEntry>,
    patterns: PatternRegistry,
    stats: CacheStats,
    default_ttl: Duration,
}

// == Cache Store ==
/// A bounded, TTL-expiring key/value store safe to share across threads.
///
/// Expiry is a sliding window measured from the last successful access, and
/// is enforced on read: a stale entry is deleted by the `get` that finds it.
/// Writes past capacity evict the least recently used live entry.
///
/// Every operation takes the store's one exclusive lock and returns
/// promptly; `get` counts as a mutation because it refreshes the access
/// timestamp. Concurrent misses on a cold key are not de-duplicated -
/// each caller observes its own miss and refetches independently.
#[derive(Debug)]
pub struct CacheStore {
    /// Namespace label used in snapshots and logs
    name: String,
    /// Capacity ceiling, fixed at construction
    max_entries: usize,
    /// Single lock over the mutable state
    inner: Mutex<StoreInner>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with the given capacity and default TTL.
    ///
    /// # Arguments
    /// * `name` - Namespace label for snapshots and logs
    /// * `max_entries` - Maximum number of entries the store can hold
    /// * `default_ttl` - TTL for keys without a matching pattern rule
    pub fn new(name: &str, max_entries: usize, default_ttl: Duration) -> Self {
        Self {
            name: name.to_string(),
            max_entries,
            inner: Mutex::new(StoreInner {
                entries: HashMap::new(),
                patterns: PatternRegistry::new(),
                stats: CacheStats::new(),
                default_ttl,
            }),
        }
    }

    /// Registers an invalidation pattern during construction, consuming and
    /// returning the store so calls can be chained.
    pub fn with_invalidation_pattern(self, pattern: &str, ttl: Option<Duration>) -> Self {
        self.add_invalidation_pattern(pattern, ttl);
        self
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns `None` when the key is absent, when the stored value is
    /// semantically empty (JSON null, empty string/array/object), or when
    /// the entry has been idle for longer than its effective TTL - in the
    /// last case the stale entry is removed on the spot. A hit refreshes
    /// the entry's access timestamp and clones the value out.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.lookup(key, None)
    }

    // == Get With Custom TTL ==
    /// Identical to [`get`](Self::get), but `ttl` replaces the effective
    /// TTL for this call only. Nothing is persisted.
    pub fn get_with_custom_ttl(&self, key: &str, ttl: Duration) -> Option<Value> {
        self.lookup(key, Some(ttl))
    }

    fn lookup(&self, key: &str, override_ttl: Option<Duration>) -> Option<Value> {
        let started = Instant::now();
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let ttl =
            override_ttl.unwrap_or_else(|| inner.patterns.effective_ttl(key, inner.default_ttl));

        // Expiry-on-read: a stale entry is deleted by the lookup that
        // finds it.
        let expired = matches!(inner.entries.get(key), Some(entry) if entry.is_expired(ttl));
        if expired {
            inner.entries.remove(key);
            inner.stats.record_miss(started.elapsed());
            return None;
        }

        match inner.entries.get_mut(key) {
            Some(entry) if is_empty_value(&entry.value) => {
                inner.stats.record_miss(started.elapsed());
                None
            }
            Some(entry) => {
                entry.touch();
                let value = entry.value.clone();
                inner.stats.record_hit(started.elapsed());
                Some(value)
            }
            None => {
                inner.stats.record_miss(started.elapsed());
                None
            }
        }
    }

    // == Set ==
    /// Stores a key/value pair, resetting both of the entry's timestamps.
    ///
    /// Overwriting an existing key replaces the value in place. Inserting a
    /// new key at capacity first evicts the entry with the oldest access
    /// timestamp, ties broken by earliest insertion.
    pub fn set(&self, key: &str, value: Value) {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        if let Some(entry) = inner.entries.get_mut(key) {
            entry.replace(value);
            return;
        }

        if inner.entries.len() >= self.max_entries {
            let victim = inner
                .entries
                .iter()
                .min_by_key(|(_, entry)| (entry.last_access_at, entry.inserted_at))
                .map(|(key, _)| key.clone());
            if let Some(victim) = victim {
                inner.entries.remove(&victim);
                inner.stats.record_eviction();
                debug!("Evicted '{}' from {} store at capacity", victim, self.name);
            }
        }

        inner.entries.insert(key.to_string(), CacheEntry::new(value));
        debug_assert!(
            inner.entries.len() <= self.max_entries,
            "store exceeded its capacity ceiling"
        );
    }

    // == Delete ==
    /// Removes an entry by key, reporting whether anything was removed.
    pub fn delete(&self, key: &str) -> bool {
        self.inner.lock().entries.remove(key).is_some()
    }

    // == Clear ==
    /// Removes all entries. Statistics are left untouched.
    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }

    // == Add Invalidation Pattern ==
    /// Registers a pattern rule assigning `ttl` (or the store default, if
    /// `None`) to matching keys. Invalid patterns are logged and ignored.
    pub fn add_invalidation_pattern(&self, pattern: &str, ttl: Option<Duration>) {
        self.inner.lock().patterns.add_pattern(pattern, ttl);
    }

    // == Invalidate By Pattern ==
    /// Deletes every live key matching `pattern` and returns the count
    /// removed.
    ///
    /// The pattern is compiled fresh, independent of any registered rules.
    /// An invalid pattern is logged and removes nothing.
    pub fn invalidate_by_pattern(&self, pattern: &str) -> usize {
        let regex = match compile_pattern(pattern) {
            Ok(regex) => regex,
            Err(err) => {
                warn!("Pattern invalidation skipped: {}", err);
                return 0;
            }
        };

        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let matching: Vec<String> = inner
            .entries
            .keys()
            .filter(|key| regex.is_match(key))
            .cloned()
            .collect();
        for key in &matching {
            inner.entries.remove(key);
        }
        if !matching.is_empty() {
            debug!(
                "Invalidated {} entries from {} store matching '{}'",
                matching.len(),
                self.name,
                pattern
            );
        }
        matching.len()
    }

    // == LRU / MRU Introspection ==
    /// Returns up to `n` live `(key, value)` pairs, least recently accessed
    /// first.
    pub fn lru_items(&self, n: usize) -> Vec<(String, Value)> {
        let mut items = self.items_by_recency();
        items.truncate(n);
        items
    }

    /// Returns up to `n` live `(key, value)` pairs, most recently accessed
    /// first.
    pub fn mru_items(&self, n: usize) -> Vec<(String, Value)> {
        let mut items = self.items_by_recency();
        items.reverse();
        items.truncate(n);
        items
    }

    /// All non-expired entries ordered by ascending access time; ties fall
    /// back to insertion time, then key, so the ordering is total.
    fn items_by_recency(&self) -> Vec<(String, Value)> {
        let guard = self.inner.lock();
        let inner = &*guard;

        let mut live: Vec<(&String, &CacheEntry)> = inner
            .entries
            .iter()
            .filter(|(key, entry)| {
                !entry.is_expired(inner.patterns.effective_ttl(key, inner.default_ttl))
            })
            .collect();
        live.sort_by(|(a_key, a), (b_key, b)| {
            a.last_access_at
                .cmp(&b.last_access_at)
                .then(a.inserted_at.cmp(&b.inserted_at))
                .then(a_key.cmp(b_key))
        });
        live.into_iter()
            .map(|(key, entry)| (key.clone(), entry.value.clone()))
            .collect()
    }

    // == Prune Expired ==
    /// Removes every entry past its effective TTL and returns the count.
    ///
    /// Expiry-on-read already keeps hot keys honest; pruning bounds the
    /// memory held by keys nothing reads anymore.
    pub fn prune_expired(&self) -> usize {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let stale: Vec<String> = inner
            .entries
            .iter()
            .filter(|(key, entry)| {
                entry.is_expired(inner.patterns.effective_ttl(key, inner.default_ttl))
            })
            .map(|(key, _)| key.clone())
            .collect();
        for key in &stale {
            inner.entries.remove(key);
        }
        stale.len()
    }

    // == Stats ==
    /// Returns a copy of the current statistics.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats.clone()
    }

    /// Zeroes the statistics counters.
    pub fn reset_stats(&self) {
        self.inner.lock().stats.reset();
    }

    // == Snapshot ==
    /// Returns a read-only snapshot of the store's configuration and
    /// counters.
    pub fn snapshot(&self) -> StoreSnapshot {
        let inner = self.inner.lock();
        StoreSnapshot {
            name: self.name.clone(),
            hits: inner.stats.hits,
            misses: inner.stats.misses,
            evictions: inner.stats.evictions,
            hit_rate: inner.stats.hit_rate(),
            average_access_time_ms: inner.stats.average_access_time_ms(),
            size: inner.entries.len(),
            max_entries: self.max_entries,
            default_ttl_secs: inner.default_ttl.as_secs(),
        }
    }

    // == TTL Accessors ==
    /// Returns the store's current default TTL.
    pub fn default_ttl(&self) -> Duration {
        self.inner.lock().default_ttl
    }

    /// Replaces the store's default TTL. Keys governed by a pattern rule
    /// with its own TTL are unaffected.
    pub fn set_default_ttl(&self, ttl: Duration) {
        self.inner.lock().default_ttl = ttl;
    }

    // == Name ==
    /// Returns the store's namespace label.
    pub fn name(&self) -> &str {
        &self.name
    }

    // == Length ==
    /// Returns the current number of entries, stale ones included.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }
}
