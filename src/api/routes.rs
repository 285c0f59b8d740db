//! API Routes
//!
//! Configures the Axum router with all catalog endpoints.

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_book_handler, delete_book_handler, get_book_handler, health_handler,
    list_books_handler, stats_handler, update_book_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/books` - List all books
/// - `POST /api/books` - Create a book
/// - `GET /api/books/:id` - Fetch one book
/// - `PUT /api/books/:id` - Update a book
/// - `DELETE /api/books/:id` - Delete a book
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: any origin, the four verbs above
/// - Tracing: logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route(
            "/api/books",
            get(list_books_handler).post(create_book_handler),
        )
        .route(
            "/api/books/:id",
            get(get_book_handler)
                .put(update_book_handler)
                .delete(delete_book_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
