//! Cache Statistics Module
//!
//! Tracks how often reads are served from the cache and how often writes reach the repository.

use serde::Serialize;

// == Cache Stats ==
/// Tracks settings cache metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Reads served from the cache
    pub hits: u64,
    /// Reads that had to resolve through the repository
    pub misses: u64,
    /// Repository reads (single lookups and bulk loads)
    pub repository_reads: u64,
    /// Scalar writes sent to the repository
    pub persisted_writes: u64,
    /// Structured writes kept in the cache only
    pub skipped_writes: u64,
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
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_repository_read(&mut self) {
        self.repository_reads += 1;
    }

    pub fn record_persisted_write(&mut self) {
        self.persisted_writes += 1;
    }

    pub fn record_skipped_write(&mut self) {
        self.skipped_writes += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
