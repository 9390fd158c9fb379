//! Configuration Module
//!
//! Handles loading cache sizing and TTL parameters from environment variables.

use std::env;

/// Sizing and expiry parameters for a single cache store.
#[derive(Debug, Clone, Copy)]
pub struct StoreConfig {
    /// Maximum number of entries the store can hold
    pub max_entries: usize,
    /// Default TTL in seconds for keys without a matching pattern rule
    pub default_ttl_secs: u64,
}

/// Configuration for the full cache manager.
///
/// Each namespace is tuned independently: ticket payloads churn quickly and
/// arrive in bulk, view definitions change rarely, user records sit in
/// between. All values can be overridden via environment variables.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Tickets store parameters
    pub tickets: StoreConfig,
    /// Views store parameters
    pub views: StoreConfig,
    /// Users store parameters
    pub users: StoreConfig,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `TICKETS_CACHE_MAX_ENTRIES` / `TICKETS_CACHE_TTL` (default: 1000 / 300)
    /// - `VIEWS_CACHE_MAX_ENTRIES` / `VIEWS_CACHE_TTL` (default: 100 / 900)
    /// - `USERS_CACHE_MAX_ENTRIES` / `USERS_CACHE_TTL` (default: 500 / 1800)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            tickets: StoreConfig {
                max_entries: env_or("TICKETS_CACHE_MAX_ENTRIES", 1000),
                default_ttl_secs: env_or("TICKETS_CACHE_TTL", 300),
            },
            views: StoreConfig {
                max_entries: env_or("VIEWS_CACHE_MAX_ENTRIES", 100),
                default_ttl_secs: env_or("VIEWS_CACHE_TTL", 900),
            },
            users: StoreConfig {
                max_entries: env_or("USERS_CACHE_MAX_ENTRIES", 500),
                default_ttl_secs: env_or("USERS_CACHE_TTL", 1800),
            },
            cleanup_interval: env_or("CLEANUP_INTERVAL", 60),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            tickets: StoreConfig {
                max_entries: 1000,
                default_ttl_secs: 300,
            },
            views: StoreConfig {
                max_entries: 100,
                default_ttl_secs: 900,
            },
            users: StoreConfig {
                max_entries: 500,
                default_ttl_secs: 1800,
            },
            cleanup_interval: 60,
        }
    }
}

/// Reads an environment variable, falling back to `default` when the
/// variable is unset or unparseable.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
