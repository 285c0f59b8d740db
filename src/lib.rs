//! Book Catalog - a book record service with cache-aside reads
//!
//! Reads are served from a cache when possible and fall back to the record
//! store; writes hit the record store first and then invalidate or refresh
//! the affected cache keys.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use catalog::Catalog;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
