//! Cache-aside coordinator.
//!
//! Reads go cache first and fall back to the record store, repopulating the
//! cache on the way out. Writes go to the record store first; only after the
//! store has accepted a write are cache keys invalidated or refreshed.
//!
//! The cache is never authoritative. Any cache failure is logged, counted and
//! treated as a miss (reads) or a no-op (writes); callers only ever see store
//! outcomes.
//!
//! Read-side population re-checks a write epoch so that a read which raced a
//! write does not put its older snapshot back after the write's invalidation.
//! The check and the cache set are not atomic; a write landing between them
//! can still leave an older snapshot until it expires. No lock closes that
//! window.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::cache::CacheAdapter;
use crate::catalog::keys::{item_key, CachePolicy, COLLECTION_KEY};
use crate::catalog::{CacheWrite, CatalogStats, CatalogStatsSnapshot, Sourced};
use crate::error::{CatalogError, Result, StoreError};
use crate::models::{Book, BookId, BookPatch, NewBook};
use crate::store::RecordStore;

// == Catalog ==
/// Single authority over when to read from cache vs. store and what to
/// invalidate after a write.
pub struct Catalog {
    store: Arc<dyn RecordStore>,
    cache: Arc<dyn CacheAdapter>,
    policy: CachePolicy,
    stats: CatalogStats,
    /// Bumped after every successful store mutation
    write_epoch: AtomicU64,
}

impl Catalog {
    /// Creates a coordinator over the given adapters with the default policy.
    pub fn new(store: Arc<dyn RecordStore>, cache: Arc<dyn CacheAdapter>) -> Self {
        Self {
            store,
            cache,
            policy: CachePolicy::default(),
            stats: CatalogStats::new(),
            write_epoch: AtomicU64::new(0),
        }
    }

    /// Replaces the expiration policy.
    pub fn with_policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub fn stats(&self) -> CatalogStatsSnapshot {
        self.stats.snapshot()
    }

    // == Reads ==

    /// Fetches every book, from the collection snapshot when one is cached.
    pub async fn list_books(&self) -> Result<Sourced<Vec<Book>>> {
        if let Some(books) = self.read_cached::<Vec<Book>>(COLLECTION_KEY).await {
            debug!(count = books.len(), "cache hit for all books");
            return Ok(Sourced::from_cache(books));
        }

        let epoch = self.write_epoch.load(Ordering::Acquire);
        let books = self.store.get_all().await.map_err(|err| {
            warn!(error = %err, "failed to load all books");
            CatalogError::from(err)
        })?;
        let cache_write = self.populate_after_read(COLLECTION_KEY, &books, epoch).await;
        info!(count = books.len(), "retrieved all books from store");

        Ok(Sourced::from_store(books, cache_write))
    }

    /// Fetches one book. Malformed identifiers are rejected before any I/O.
    pub async fn get_book(&self, raw_id: &str) -> Result<Sourced<Book>> {
        let id = BookId::parse(raw_id)?;
        let key = item_key(&id);

        if let Some(book) = self.read_cached::<Book>(&key).await {
            debug!(%id, "cache hit for book");
            return Ok(Sourced::from_cache(book));
        }

        let epoch = self.write_epoch.load(Ordering::Acquire);
        let book = self.store.get_by_id(&id).await.map_err(|err| {
            log_store_failure("get", &id, &err);
            CatalogError::from(err)
        })?;
        let cache_write = self.populate_after_read(&key, &book, epoch).await;
        info!(%id, "retrieved book from store");

        Ok(Sourced::from_store(book, cache_write))
    }

    // == Writes ==

    /// Creates a book and drops the collection snapshot.
    ///
    /// The new book's item key is left cold; the first read fills it.
    pub async fn create_book(&self, new: NewBook) -> Result<Book> {
        let book = self.store.create(new).await.map_err(|err| {
            warn!(error = %err, "failed to create book");
            CatalogError::from(err)
        })?;

        self.bump_epoch();
        self.invalidate(COLLECTION_KEY).await;
        info!(id = %book.id, title = %book.title, "created book");

        Ok(book)
    }

    /// Updates a book, drops the collection snapshot, then refreshes the
    /// book's item key with the updated value.
    ///
    /// If the refresh cannot be written the item key is dropped instead, so
    /// an older snapshot never outlives the update.
    pub async fn update_book(&self, raw_id: &str, patch: BookPatch) -> Result<Book> {
        let id = BookId::parse(raw_id)?;

        let book = self.store.update_by_id(&id, patch).await.map_err(|err| {
            log_store_failure("update", &id, &err);
            CatalogError::from(err)
        })?;

        self.bump_epoch();
        self.invalidate(COLLECTION_KEY).await;
        let key = item_key(&id);
        if let CacheWrite::Failed(_) = self.populate(&key, &book).await {
            self.invalidate(&key).await;
        }
        info!(%id, "updated book");

        Ok(book)
    }

    /// Deletes a book and drops both its item key and the collection snapshot.
    pub async fn delete_book(&self, raw_id: &str) -> Result<Book> {
        let id = BookId::parse(raw_id)?;

        let book = self.store.delete_by_id(&id).await.map_err(|err| {
            log_store_failure("delete", &id, &err);
            CatalogError::from(err)
        })?;

        self.bump_epoch();
        self.invalidate(COLLECTION_KEY).await;
        self.invalidate(&item_key(&id)).await;
        info!(%id, "deleted book");

        Ok(book)
    }

    // == Cache Side Effects ==

    /// Reads and decodes a snapshot. Every failure mode is a miss.
    async fn read_cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.cache.get(key).await {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(value) => {
                    self.stats.record_hit();
                    Some(value)
                }
                Err(err) => {
                    warn!(key, error = %err, "discarding undecodable cache entry");
                    self.stats.record_miss();
                    None
                }
            },
            Ok(None) => {
                self.stats.record_miss();
                None
            }
            Err(err) => {
                warn!(key, error = %err, "cache read failed, falling back to store");
                self.stats.record_cache_error();
                self.stats.record_miss();
                None
            }
        }
    }

    fn bump_epoch(&self) {
        self.write_epoch.fetch_add(1, Ordering::AcqRel);
    }

    /// Populates after a store read unless a write completed since `epoch`.
    async fn populate_after_read<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        epoch: u64,
    ) -> CacheWrite {
        if self.write_epoch.load(Ordering::Acquire) != epoch {
            debug!(key, "write raced this read, not caching its snapshot");
            return CacheWrite::Superseded;
        }
        self.populate(key, value).await
    }

    /// Writes a snapshot under the policy TTL. Failures are logged, not raised.
    async fn populate<T: Serialize>(&self, key: &str, value: &T) -> CacheWrite {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(key, error = %err, "failed to encode cache snapshot");
                return CacheWrite::Failed(err.to_string());
            }
        };

        let ttl_secs = self.policy.ttl_secs();
        match self.cache.set(key, bytes, ttl_secs).await {
            Ok(()) => CacheWrite::Stored { ttl_secs },
            Err(err) => {
                warn!(key, error = %err, "cache write failed");
                self.stats.record_cache_error();
                CacheWrite::Failed(err.to_string())
            }
        }
    }

    /// Deletes a key. Absent keys are fine; failures are logged, not raised.
    async fn invalidate(&self, key: &str) {
        match self.cache.delete(key).await {
            Ok(()) => self.stats.record_invalidation(),
            Err(err) => {
                warn!(key, error = %err, "cache invalidation failed");
                self.stats.record_cache_error();
            }
        }
    }
}

fn log_store_failure(op: &str, id: &BookId, err: &StoreError) {
    match err {
        StoreError::NotFound(_) => warn!(%id, op, "book not found"),
        _ => warn!(%id, op, error = %err, "store operation failed"),
    }
}
