//! Catalog Statistics Module
//!
//! Counters for cache effectiveness as seen by the coordinator.

use std::sync::atomic::{AtomicU64, Ordering};

// == Catalog Stats ==
/// Lock-free counters shared by all concurrent catalog calls.
#[derive(Debug, Default)]
pub struct CatalogStats {
    hits: AtomicU64,
    misses: AtomicU64,
    cache_errors: AtomicU64,
    invalidations: AtomicU64,
}

impl CatalogStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_error(&self) {
        self.cache_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalidation(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters.
    pub fn snapshot(&self) -> CatalogStatsSnapshot {
        CatalogStatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            cache_errors: self.cache_errors.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
        }
    }
}

// == Snapshot ==
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStatsSnapshot {
    /// Reads answered from the cache
    pub hits: u64,
    /// Reads that went to the store
    pub misses: u64,
    /// Cache calls that failed and were absorbed
    pub cache_errors: u64,
    /// Cache keys deleted by writes
    pub invalidations: u64,
}

impl CatalogStatsSnapshot {
    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
