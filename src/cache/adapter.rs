//! Cache Adapter Module
//!
//! The key/value contract the catalog coordinator depends on, and the
//! in-process implementation backed by [`CacheStore`].

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::CacheStore;
use crate::error::CacheError;

// == Cache Adapter ==
/// Key/value cache with per-key expiration.
///
/// Implementations are never authoritative. Deleting an absent key is `Ok`.
#[async_trait]
pub trait CacheAdapter: Send + Sync {
    /// Returns the live value under `key`, or `None` on a miss.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Stores `value` under `key` for `ttl_secs` seconds.
    async fn set(&self, key: &str, value: Vec<u8>, ttl_secs: u64) -> Result<(), CacheError>;

    /// Removes `key` if present.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

// == In-Memory Cache ==
/// Process-local cache adapter.
///
/// Cloning yields another handle to the same store. The lock is held only
/// for the duration of a single synchronous store call.
#[derive(Debug, Clone)]
pub struct InMemoryCache {
    store: Arc<RwLock<CacheStore>>,
}

impl InMemoryCache {
    /// Creates a cache holding at most `max_entries` entries.
    pub fn new(max_entries: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new(max_entries))),
        }
    }

    /// Drops expired entries, returning how many were removed.
    pub async fn cleanup_expired(&self) -> usize {
        self.store.write().await.cleanup_expired()
    }

    /// Returns true if `key` holds a live entry. Does not touch LRU order.
    pub async fn contains(&self, key: &str) -> bool {
        self.store.read().await.contains(key)
    }

    /// Remaining TTL in seconds for a live entry.
    pub async fn ttl_remaining(&self, key: &str) -> Option<u64> {
        self.store.read().await.ttl_remaining(key)
    }

    /// Number of stored entries, expired ones included until swept.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Entries evicted for capacity so far.
    pub async fn evictions(&self) -> u64 {
        self.store.read().await.evictions()
    }
}

#[async_trait]
impl CacheAdapter for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        // write lock: reads update LRU order and drop expired entries
        Ok(self.store.write().await.get(key))
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl_secs: u64) -> Result<(), CacheError> {
        self.store.write().await.set(key, value, ttl_secs)
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.write().await.delete(key);
        Ok(())
    }
}
