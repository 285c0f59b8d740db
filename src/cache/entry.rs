//! Cache Entry Module
//!
//! A serialized snapshot plus its expiration deadline.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
///
/// Every entry expires; there is no "forever" entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Serialized snapshot
    pub value: Vec<u8>,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl_seconds` from now.
    pub fn new(value: Vec<u8>, ttl_seconds: u64) -> Self {
        let now = current_timestamp_ms();

        Self {
            value,
            created_at: now,
            expires_at: now.saturating_add(ttl_seconds.saturating_mul(1000)),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches the deadline.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, 0 once expired.
    pub fn ttl_remaining_ms(&self) -> u64 {
        self.expires_at.saturating_sub(current_timestamp_ms())
    }

    /// Returns remaining TTL in whole seconds.
    pub fn ttl_remaining(&self) -> u64 {
        self.ttl_remaining_ms() / 1000
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
