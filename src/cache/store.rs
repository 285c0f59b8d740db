//! Cache Store Module
//!
//! In-process cache engine combining HashMap storage with LRU tracking and TTL expiration.

use std::collections::HashMap;

use crate::cache::{CacheEntry, LruTracker, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::CacheError;

// == Cache Store ==
/// Byte-valued cache storage with LRU eviction and mandatory TTLs.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Entries dropped to make room
    evictions: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `max_entries` entries.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            max_entries,
            evictions: 0,
        }
    }

    // == Set ==
    /// Stores a value under `key`, expiring after `ttl_secs` seconds.
    ///
    /// Overwriting a key replaces the value and resets its TTL.
    /// At capacity, the least recently used entry is evicted.
    pub fn set(&mut self, key: &str, value: Vec<u8>, ttl_secs: u64) -> Result<(), CacheError> {
        if key.is_empty() || key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidRequest(format!(
                "Key must be 1..={} bytes",
                MAX_KEY_LENGTH
            )));
        }

        if value.len() > MAX_VALUE_SIZE {
            return Err(CacheError::InvalidRequest(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        if ttl_secs == 0 {
            return Err(CacheError::InvalidRequest(
                "Entries must carry a non-zero TTL".to_string(),
            ));
        }

        let is_overwrite = self.entries.contains_key(key);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            match self.lru.evict_oldest() {
                Some(evicted_key) => {
                    self.entries.remove(&evicted_key);
                    self.evictions += 1;
                }
                None => {
                    return Err(CacheError::CacheFull(
                        "Cache is full and eviction failed".to_string(),
                    ));
                }
            }
        }

        self.entries
            .insert(key.to_string(), CacheEntry::new(value, ttl_secs));
        self.lru.touch(key);

        Ok(())
    }

    // == Get ==
    /// Retrieves a live value by key.
    ///
    /// Expired entries are removed and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        let expired = self.entries.get(key)?.is_expired();
        if expired {
            self.entries.remove(key);
            self.lru.remove(key);
            return None;
        }

        self.lru.touch(key);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.lru.remove(key);
            true
        } else {
            false
        }
    }

    // == Remaining TTL ==
    /// Remaining TTL in seconds for a live entry.
    pub fn ttl_remaining(&self, key: &str) -> Option<u64> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(CacheEntry::ttl_remaining)
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        expired_keys.len()
    }

    /// Returns true if `key` holds a live entry.
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    /// Number of entries evicted for capacity so far.
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
