//! Cache Statistics Module
//!
//! Tracks how collection reads were served: cache hits, refreshes from the
//! remote store, degraded fallbacks and point-patches.

use serde::Serialize;

// == Cache Stats ==
/// Read-path counters for the collection cache.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Reads answered from a valid, count-matching snapshot
    pub hits: u64,
    /// Reads that listed the full collection from the remote store
    pub misses: u64,
    /// Reads answered from a stale-safe snapshot after a remote failure
    pub fallbacks: u64,
    /// Reads that returned nothing because the remote failed with no snapshot
    pub empty_fallbacks: u64,
    /// Point-patches applied after successful remote mutations
    pub patches: u64,
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

    pub fn record_fallback(&mut self) {
        self.fallbacks += 1;
    }

    pub fn record_empty_fallback(&mut self) {
        self.empty_fallbacks += 1;
    }

    pub fn record_patch(&mut self) {
        self.patches += 1;
    }
}
