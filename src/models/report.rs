//! Snapshot DTOs for cache introspection
//!
//! Stores and the manager report their state through these read-only
//! copies; internal maps and TTLs are never handed out directly.

use serde::Serialize;

/// Point-in-time view of a single store.
#[derive(Debug, Clone, Serialize)]
pub struct StoreSnapshot {
    /// Store namespace ("tickets", "views", "users")
    pub name: String,
    /// Number of successful retrievals
    pub hits: u64,
    /// Number of failed retrievals
    pub misses: u64,
    /// Number of capacity evictions
    pub evictions: u64,
    /// Hit rate (hits / (hits + misses)), 0.0 with no lookups
    pub hit_rate: f64,
    /// Average lookup duration in milliseconds
    pub average_access_time_ms: f64,
    /// Current number of entries
    pub size: usize,
    /// Maximum number of entries
    pub max_entries: usize,
    /// Default TTL in seconds
    pub default_ttl_secs: u64,
}

/// Aggregate statistics report across every store the manager owns.
///
/// Each store is snapshotted under its own lock, one after another, so the
/// report is not a single atomic cut across stores.
#[derive(Debug, Clone, Serialize)]
pub struct CacheReport {
    /// When the report was assembled
    pub captured_at: chrono::DateTime<chrono::Utc>,
    /// Per-store snapshots
    pub stores: Vec<StoreSnapshot>,
}

impl CacheReport {
    /// Creates a report over the given snapshots, stamped with now.
    pub fn new(stores: Vec<StoreSnapshot>) -> Self {
        Self {
            captured_at: chrono::Utc::now(),
            stores,
        }
    }

    /// Looks up the snapshot for a named store, if present.
    pub fn store(&self, name: &str) -> Option<&StoreSnapshot> {
        self.stores.iter().find(|s| s.name == name)
    }
}
