//! Response DTOs for the catalog API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::catalog::{CatalogStatsSnapshot, Source};
use crate::models::Book;

/// Response body for reads, tagged with where the data came from
/// (GET /api/books, GET /api/books/:id)
#[derive(Debug, Clone, Serialize)]
pub struct SourcedResponse<T> {
    /// `cache` or `store`
    pub source: Source,
    /// The requested book or collection
    pub data: T,
}

impl<T> SourcedResponse<T> {
    /// Creates a new SourcedResponse
    pub fn new(source: Source, data: T) -> Self {
        Self { source, data }
    }
}

/// Response body for the DELETE operation (DELETE /api/books/:id)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The book that was removed
    pub book: Book,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(book: Book) -> Self {
        Self {
            message: "Book deleted".to_string(),
            book,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Reads answered from the cache
    pub hits: u64,
    /// Reads that fell through to the store
    pub misses: u64,
    /// Cache operations that failed and were absorbed
    pub cache_errors: u64,
    /// Cache keys removed by writes
    pub invalidations: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CatalogStatsSnapshot> for StatsResponse {
    fn from(stats: CatalogStatsSnapshot) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            cache_errors: stats.cache_errors,
            invalidations: stats.invalidations,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
