//! Cache Module
//!
//! The cache adapter contract plus an in-memory engine with TTL expiration
//! and LRU eviction.

mod adapter;
mod entry;
mod lru;
mod store;


// Re-export public types
pub use adapter::{CacheAdapter, InMemoryCache};
pub use lru::LruTracker;
pub use store::CacheStore;

use entry::CacheEntry;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 8 * 1024 * 1024; // 8 MB
