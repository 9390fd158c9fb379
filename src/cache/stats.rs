//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, evictions, and
//! access latency.

use std::time::Duration;

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
///
/// Carries no lock of its own: every mutation happens while the owning
/// store's lock is held.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (absent, empty, or expired)
    pub misses: u64,
    /// Number of entries evicted to enforce capacity
    pub evictions: u64,
    /// Total wall-clock time spent in lookups
    #[serde(skip)]
    pub total_access_time: Duration,
    /// Number of lookups contributing to `total_access_time`
    pub access_count: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Average Access Time ==
    /// Average lookup duration in milliseconds, 0.0 if no lookups recorded.
    pub fn average_access_time_ms(&self) -> f64 {
        if self.access_count == 0 {
            0.0
        } else {
            self.total_access_time.as_secs_f64() / self.access_count as f64 * 1000.0
        }
    }

    // == Record Hit ==
    /// Increments the hit counter and accumulates the lookup duration.
    pub fn record_hit(&mut self, elapsed: Duration) {
        self.hits += 1;
        self.record_access(elapsed);
    }

    // == Record Miss ==
    /// Increments the miss counter and accumulates the lookup duration.
    pub fn record_miss(&mut self, elapsed: Duration) {
        self.misses += 1;
        self.record_access(elapsed);
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Reset ==
    /// Zeroes all counters and accumulated access time.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn record_access(&mut self, elapsed: Duration) {
        self.total_access_time += elapsed;
        self.access_count += 1;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.access_count, 0);
        assert_eq!(stats.total_access_time, Duration::ZERO);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit(Duration::from_micros(10));
        stats.record_hit(Duration::from_micros(10));
        stats.record_miss(Duration::from_micros(10));
        stats.record_miss(Duration::from_micros(10));
        assert_eq!(stats.hit_rate(), 0.5);
        assert_eq!(stats.access_count, 4);
    }

    #[test]
    fn test_hit_rate_all_hits() {
        let mut stats = CacheStats::new();
        stats.record_hit(Duration::ZERO);
        stats.record_hit(Duration::ZERO);
        assert_eq!(stats.hit_rate(), 1.0);
    }

    #[test]
    fn test_average_access_time_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.average_access_time_ms(), 0.0);
    }

    #[test]
    fn test_average_access_time() {
        let mut stats = CacheStats::new();
        stats.record_hit(Duration::from_millis(2));
        stats.record_miss(Duration::from_millis(4));
        assert!((stats.average_access_time_ms() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_record_eviction() {
        let mut stats = CacheStats::new();
        stats.record_eviction();
        stats.record_eviction();
        assert_eq!(stats.evictions, 2);
    }

    #[test]
    fn test_reset_zeroes_everything() {
        let mut stats = CacheStats::new();
        stats.record_hit(Duration::from_millis(1));
        stats.record_miss(Duration::from_millis(1));
        stats.record_eviction();

        stats.reset();

        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.access_count, 0);
        assert_eq!(stats.average_access_time_ms(), 0.0);
    }
}
