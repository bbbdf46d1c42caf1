//! Cache Statistics Module
//!
//! Tracks lookups and evictions for both eviction triggers.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of successful lookups
    pub hits: u64,
    /// Number of lookups for absent keys
    pub misses: u64,
    /// Entries evicted because a put overflowed the configured capacity
    pub capacity_evictions: u64,
    /// Entries evicted by the memory-pressure monitor
    pub pressure_evictions: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
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

    /// Total evictions across both triggers.
    pub fn evictions(&self) -> u64 {
        self.capacity_evictions + self.pressure_evictions
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_capacity_eviction(&mut self) {
        self.capacity_evictions += 1;
    }

    pub fn record_pressure_evictions(&mut self, count: usize) {
        self.pressure_evictions += count as u64;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
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
        assert_eq!(stats.evictions(), 0);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_evictions_sum_both_triggers() {
        let mut stats = CacheStats::new();
        stats.record_capacity_eviction();
        stats.record_capacity_eviction();
        stats.record_pressure_evictions(5);
        assert_eq!(stats.capacity_evictions, 2);
        assert_eq!(stats.pressure_evictions, 5);
        assert_eq!(stats.evictions(), 7);
    }
}
