//! Record Store Module
//!
//! The system-of-record contract for books and an in-memory implementation.

mod memory;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{Book, BookId, BookPatch, NewBook};

pub use memory::InMemoryRecordStore;

// == Record Store ==
/// Durable CRUD over books. The store assigns identifiers.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persists a new book and returns it with its assigned identifier.
    async fn create(&self, new: NewBook) -> Result<Book, StoreError>;

    /// Loads one book.
    async fn get_by_id(&self, id: &BookId) -> Result<Book, StoreError>;

    /// Loads every book.
    async fn get_all(&self) -> Result<Vec<Book>, StoreError>;

    /// Applies a partial update in place and returns the updated book.
    async fn update_by_id(&self, id: &BookId, patch: BookPatch) -> Result<Book, StoreError>;

    /// Removes a book and returns what was removed.
    async fn delete_by_id(&self, id: &BookId) -> Result<Book, StoreError>;
}
