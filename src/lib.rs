//! Ticket Cache - concurrent caching for a rate-limited ticketing API
//!
//! Shields the upstream API from redundant calls: per-namespace TTL stores
//! with sliding-window expiry, LRU eviction, pattern-based invalidation,
//! and hit/miss statistics, aggregated behind a [`CacheManager`].

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use cache::{CacheManager, CacheStats, CacheStore};
pub use config::CacheConfig;
pub use error::CacheError;
pub use models::{CacheReport, StoreSnapshot};
pub use tasks::spawn_cleanup_task;
