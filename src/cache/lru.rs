//! LRU Tracker Module
//!
//! Least Recently Used ordering for cache eviction.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
/// Tracks access order for LRU eviction.
///
/// Every touch stamps the key with a fresh tick; the smallest tick is the
/// least recently used key. Both maps always hold the same key set.
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Latest tick per key
    ticks: HashMap<String, u64>,
    /// Keys ordered by tick, oldest first
    order: BTreeMap<u64, String>,
    /// Next tick to hand out
    clock: u64,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used.
    pub fn touch(&mut self, key: &str) {
        let tick = self.clock;
        self.clock += 1;

        if let Some(previous) = self.ticks.insert(key.to_string(), tick) {
            self.order.remove(&previous);
        }
        self.order.insert(tick, key.to_string());
    }

    // == Remove ==
    /// Stops tracking a key.
    pub fn remove(&mut self, key: &str) {
        if let Some(tick) = self.ticks.remove(key) {
            self.order.remove(&tick);
        }
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.order.pop_first()?;
        self.ticks.remove(&key);
        Some(key)
    }

    /// Returns the least recently used key without removing it.
    #[cfg(test)]
    pub fn peek_oldest(&self) -> Option<&str> {
        self.order.values().next().map(String::as_str)
    }

    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
}
