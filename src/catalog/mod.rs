//! Catalog Module
//!
//! The cache-aside coordinator, its key scheme and TTL policy, and the
//! source-tagged results it returns.

mod coordinator;
pub mod keys;
mod outcome;
mod stats;

pub use coordinator::Catalog;
pub use keys::{item_key, CachePolicy, COLLECTION_KEY, DEFAULT_TTL_SECS};
pub use outcome::{CacheWrite, Source, Sourced};
pub use stats::{CatalogStats, CatalogStatsSnapshot};
