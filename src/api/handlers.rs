//! API Handlers
//!
//! HTTP request handlers for each catalog endpoint. All data access goes
//! through the [`Catalog`] coordinator.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::cache::InMemoryCache;
use crate::catalog::{CachePolicy, Catalog, Sourced};
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    Book, CreateBookRequest, DeleteResponse, HealthResponse, SourcedResponse, StatsResponse,
    UpdateBookRequest,
};
use crate::store::InMemoryRecordStore;

/// Response header naming where a read was answered from.
pub const CACHE_SOURCE_HEADER: &str = "x-cache-source";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-aside coordinator over the configured adapters
    pub catalog: Arc<Catalog>,
}

impl AppState {
    /// Creates a new AppState around a coordinator.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Creates a new AppState over in-memory adapters sized from the Config.
    ///
    /// Returns the cache handle as well so the caller can sweep it.
    pub fn in_memory(config: &Config) -> (Self, InMemoryCache) {
        let cache = InMemoryCache::new(config.cache_max_entries);
        let catalog = Catalog::new(
            Arc::new(InMemoryRecordStore::new()),
            Arc::new(cache.clone()),
        )
        .with_policy(CachePolicy::with_ttl_secs(config.cache_ttl));

        (Self::new(catalog), cache)
    }
}

fn sourced_response<T: Serialize>(sourced: Sourced<T>) -> Response {
    let source = sourced.source;
    (
        [(CACHE_SOURCE_HEADER, source.as_str())],
        Json(SourcedResponse::new(source, sourced.value)),
    )
        .into_response()
}

/// Handler for GET /api/books
pub async fn list_books_handler(State(state): State<AppState>) -> Result<Response> {
    let books = state.catalog.list_books().await?;
    Ok(sourced_response(books))
}

/// Handler for GET /api/books/:id
pub async fn get_book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let book = state.catalog.get_book(&id).await?;
    Ok(sourced_response(book))
}

/// Handler for POST /api/books
///
/// Responds 201 with the stored book, including its assigned id. A body that
/// is not valid JSON for the request shape is a 400, like a missing field.
pub async fn create_book_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateBookRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>)> {
    let Json(req) = payload?;
    let new = req.into_new_book()?;
    let book = state.catalog.create_book(new).await?;

    Ok((StatusCode::CREATED, Json(book)))
}

/// Handler for PUT /api/books/:id
pub async fn update_book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdateBookRequest>, JsonRejection>,
) -> Result<Json<Book>> {
    let Json(req) = payload?;
    let book = state.catalog.update_book(&id, req.into()).await?;
    Ok(Json(book))
}

/// Handler for DELETE /api/books/:id
pub async fn delete_book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let book = state.catalog.delete_book(&id).await?;
    Ok(Json(DeleteResponse::new(book)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.catalog.stats().into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
