//! API Module
//!
//! HTTP handlers and routing for the catalog REST API.
//!
//! # Endpoints
//! - `GET /api/books` - List all books
//! - `POST /api/books` - Create a book
//! - `GET /api/books/:id` - Fetch one book
//! - `PUT /api/books/:id` - Update a book
//! - `DELETE /api/books/:id` - Delete a book
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
