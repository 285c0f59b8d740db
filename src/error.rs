//! Error types for the catalog service
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Catalog Error Enum ==
/// Errors surfaced to catalog callers.
///
/// Cache failures never appear here; they are absorbed by the coordinator.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Identifier is not a well-formed book identifier
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// No book exists under the identifier
    #[error("Book not found: {0}")]
    NotFound(String),

    /// Payload failed required-field checks
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Record store failed underneath the operation
    #[error("Store error: {0}")]
    Store(String),
}

// == Store Error Enum ==
/// Errors returned by a record store adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record under the identifier
    #[error("no record with id {0}")]
    NotFound(String),

    /// Record rejected by the store's schema checks
    #[error("{0}")]
    Validation(String),

    /// Underlying storage failure
    #[error("backend failure: {0}")]
    Backend(String),
}

// == Cache Error Enum ==
/// Errors returned by a cache adapter. Never fatal to catalog callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key or value rejected by the cache engine
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Cache is full and eviction failed
    #[error("Cache full: {0}")]
    CacheFull(String),

    /// Cache backend could not be reached
    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => CatalogError::NotFound(id),
            StoreError::Validation(msg) => CatalogError::Validation(msg),
            StoreError::Backend(msg) => CatalogError::Store(msg),
        }
    }
}

/// Unreadable or mistyped request bodies are validation failures.
impl From<JsonRejection> for CatalogError {
    fn from(rejection: JsonRejection) -> Self {
        CatalogError::Validation(rejection.body_text())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            CatalogError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
