//! Test doubles for the store and cache adapters.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;
use book_catalog::cache::{CacheAdapter, InMemoryCache};
use book_catalog::error::{CacheError, StoreError};
use book_catalog::models::{Book, BookId, BookPatch, NewBook};
use book_catalog::store::{InMemoryRecordStore, RecordStore};
use book_catalog::Catalog;

// == Counting Store ==
/// In-memory store that counts reads, to prove cache hits skip the store.
#[derive(Default)]
pub struct CountingStore {
    inner: InMemoryRecordStore,
    get_all_calls: AtomicUsize,
    get_by_id_calls: AtomicUsize,
}

impl CountingStore {
    pub fn reads(&self) -> usize {
        self.get_all_calls.load(Ordering::SeqCst) + self.get_by_id_calls.load(Ordering::SeqCst)
    }

    pub fn get_all_calls(&self) -> usize {
        self.get_all_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for CountingStore {
    async fn create(&self, new: NewBook) -> Result<Book, StoreError> {
        self.inner.create(new).await
    }

    async fn get_by_id(&self, id: &BookId) -> Result<Book, StoreError> {
        self.get_by_id_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_by_id(id).await
    }

    async fn get_all(&self) -> Result<Vec<Book>, StoreError> {
        self.get_all_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_all().await
    }

    async fn update_by_id(&self, id: &BookId, patch: BookPatch) -> Result<Book, StoreError> {
        self.inner.update_by_id(id, patch).await
    }

    async fn delete_by_id(&self, id: &BookId) -> Result<Book, StoreError> {
        self.inner.delete_by_id(id).await
    }
}

// == Broken Store ==
/// Store whose backend is down for every call.
pub struct BrokenStore;

#[async_trait]
impl RecordStore for BrokenStore {
    async fn create(&self, _new: NewBook) -> Result<Book, StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn get_by_id(&self, _id: &BookId) -> Result<Book, StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn get_all(&self) -> Result<Vec<Book>, StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn update_by_id(&self, _id: &BookId, _patch: BookPatch) -> Result<Book, StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn delete_by_id(&self, _id: &BookId) -> Result<Book, StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }
}

// == Gated Store ==
/// In-memory store whose next `get_all` parks after reading, until released.
///
/// Lets a test slot a write between a read's store access and its cache
/// population.
#[derive(Default)]
pub struct GatedStore {
    inner: InMemoryRecordStore,
    armed: AtomicBool,
    entered: Notify,
    release: Notify,
}

impl GatedStore {
    /// Makes the next `get_all` wait for `release`.
    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    /// Resolves once an armed `get_all` has read the store and parked.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl RecordStore for GatedStore {
    async fn create(&self, new: NewBook) -> Result<Book, StoreError> {
        self.inner.create(new).await
    }

    async fn get_by_id(&self, id: &BookId) -> Result<Book, StoreError> {
        self.inner.get_by_id(id).await
    }

    async fn get_all(&self) -> Result<Vec<Book>, StoreError> {
        let books = self.inner.get_all().await?;
        if self.armed.swap(false, Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        Ok(books)
    }

    async fn update_by_id(&self, id: &BookId, patch: BookPatch) -> Result<Book, StoreError> {
        self.inner.update_by_id(id, patch).await
    }

    async fn delete_by_id(&self, id: &BookId) -> Result<Book, StoreError> {
        self.inner.delete_by_id(id).await
    }
}

// == Unreachable Cache ==
/// Cache whose backend cannot be reached at all.
pub struct UnreachableCache;

#[async_trait]
impl CacheAdapter for UnreachableCache {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: Vec<u8>, _ttl_secs: u64) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }
}

// == Write-Rejecting Cache ==
/// Working cache whose writes can be switched to fail, e.g. a full backend.
#[derive(Clone)]
pub struct WriteRejectingCache {
    inner: InMemoryCache,
    reject_sets: Arc<AtomicBool>,
}

impl WriteRejectingCache {
    pub fn new() -> Self {
        Self {
            inner: InMemoryCache::new(1000),
            reject_sets: Arc::default(),
        }
    }

    pub fn inner(&self) -> &InMemoryCache {
        &self.inner
    }

    pub fn reject_sets(&self, reject: bool) {
        self.reject_sets.store(reject, Ordering::SeqCst);
    }
}

#[async_trait]
impl CacheAdapter for WriteRejectingCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl_secs: u64) -> Result<(), CacheError> {
        if self.reject_sets.load(Ordering::SeqCst) {
            return Err(CacheError::CacheFull("no room for snapshot".to_string()));
        }
        self.inner.set(key, value, ttl_secs).await
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.inner.delete(key).await
    }
}

// == Recording Cache ==
/// Working cache that also logs every mutation in call order.
#[derive(Clone)]
pub struct RecordingCache {
    inner: InMemoryCache,
    log: Arc<std::sync::Mutex<Vec<CacheCall>>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheCall {
    Set { key: String, ttl_secs: u64 },
    Delete { key: String },
}

impl RecordingCache {
    pub fn new() -> Self {
        Self {
            inner: InMemoryCache::new(1000),
            log: Arc::default(),
        }
    }

    pub fn inner(&self) -> &InMemoryCache {
        &self.inner
    }

    /// Drains the mutations recorded so far.
    pub fn take_calls(&self) -> Vec<CacheCall> {
        std::mem::take(&mut *self.log.lock().unwrap())
    }
}

#[async_trait]
impl CacheAdapter for RecordingCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl_secs: u64) -> Result<(), CacheError> {
        self.log.lock().unwrap().push(CacheCall::Set {
            key: key.to_string(),
            ttl_secs,
        });
        self.inner.set(key, value, ttl_secs).await
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.log.lock().unwrap().push(CacheCall::Delete {
            key: key.to_string(),
        });
        self.inner.delete(key).await
    }
}

// == Builders ==

pub fn dune() -> NewBook {
    NewBook::new("Dune", "Herbert", 1965)
}

/// Coordinator over a counting store and a plain in-memory cache.
pub fn counting_catalog() -> (Catalog, Arc<CountingStore>, InMemoryCache) {
    let store = Arc::new(CountingStore::default());
    let cache = InMemoryCache::new(1000);
    let catalog = Catalog::new(store.clone(), Arc::new(cache.clone()));
    (catalog, store, cache)
}

/// Coordinator over an in-memory store and a recording cache.
pub fn recording_catalog() -> (Catalog, RecordingCache) {
    let cache = RecordingCache::new();
    let catalog = Catalog::new(Arc::new(InMemoryRecordStore::new()), Arc::new(cache.clone()));
    (catalog, cache)
}

/// Coordinator over an in-memory store and a cache whose writes can fail.
pub fn write_rejecting_catalog() -> (Catalog, WriteRejectingCache) {
    let cache = WriteRejectingCache::new();
    let catalog = Catalog::new(Arc::new(InMemoryRecordStore::new()), Arc::new(cache.clone()));
    (catalog, cache)
}

/// Coordinator over a gated store and a plain in-memory cache.
pub fn gated_catalog() -> (Arc<Catalog>, Arc<GatedStore>, InMemoryCache) {
    let store = Arc::new(GatedStore::default());
    let cache = InMemoryCache::new(1000);
    let catalog = Arc::new(Catalog::new(store.clone(), Arc::new(cache.clone())));
    (catalog, store, cache)
}
