//! Read results tagged with their origin.

use std::fmt;

use serde::Serialize;

/// Where a read was answered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cache,
    Store,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Cache => "cache",
            Source::Store => "store",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the best-effort cache population that follows a store read.
///
/// Informational only: a failed population never fails the read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheWrite {
    /// Read was a hit; nothing to populate
    NotAttempted,
    /// Snapshot written with the given TTL
    Stored { ttl_secs: u64 },
    /// A write completed during the read; its snapshot was not cached
    Superseded,
    /// Population failed and was logged
    Failed(String),
}

/// An authoritative value plus the read's origin and cache side effect.
#[derive(Debug, Clone)]
pub struct Sourced<T> {
    pub value: T,
    pub source: Source,
    pub cache_write: CacheWrite,
}

impl<T> Sourced<T> {
    pub fn from_cache(value: T) -> Self {
        Self {
            value,
            source: Source::Cache,
            cache_write: CacheWrite::NotAttempted,
        }
    }

    pub fn from_store(value: T, cache_write: CacheWrite) -> Self {
        Self {
            value,
            source: Source::Store,
            cache_write,
        }
    }

    pub fn is_cached(&self) -> bool {
        self.source == Source::Cache
    }
}
