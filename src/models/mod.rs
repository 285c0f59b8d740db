//! Domain types and request/response models for the catalog service
//!
//! `book` holds the entity shared by the store, the cache and the API;
//! `requests` and `responses` are the HTTP DTOs.

pub mod book;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use book::{Attachment, Book, BookId, BookPatch, NewBook};
pub use requests::{CreateBookRequest, UpdateBookRequest};
pub use responses::{DeleteResponse, HealthResponse, SourcedResponse, StatsResponse};
