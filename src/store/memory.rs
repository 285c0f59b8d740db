//! In-memory record store.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use super::RecordStore;
use crate::error::StoreError;
use crate::models::{Book, BookId, BookPatch, NewBook};

#[derive(Debug, Default)]
struct Records {
    books: HashMap<BookId, Book>,
    /// Insertion order, for stable listing
    order: Vec<BookId>,
    /// Deleted identifiers, never handed out again
    retired: HashSet<BookId>,
}

impl Records {
    fn fresh_id(&self) -> BookId {
        loop {
            let id = BookId::generate();
            if !self.books.contains_key(&id) && !self.retired.contains(&id) {
                return id;
            }
        }
    }
}

/// Record store held in process memory. Last write wins on concurrent updates.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<Records>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live records.
    pub async fn len(&self) -> usize {
        self.records.read().await.books.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.books.is_empty()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn create(&self, new: NewBook) -> Result<Book, StoreError> {
        if let Some(message) = new.validate() {
            return Err(StoreError::Validation(message));
        }

        let mut records = self.records.write().await;
        let id = records.fresh_id();
        let book = Book::from_new(id, new, Utc::now());

        records.books.insert(id, book.clone());
        records.order.push(id);
        debug!(%id, "record inserted");

        Ok(book)
    }

    async fn get_by_id(&self, id: &BookId) -> Result<Book, StoreError> {
        self.records
            .read()
            .await
            .books
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn get_all(&self) -> Result<Vec<Book>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .order
            .iter()
            .filter_map(|id| records.books.get(id).cloned())
            .collect())
    }

    async fn update_by_id(&self, id: &BookId, patch: BookPatch) -> Result<Book, StoreError> {
        let mut records = self.records.write().await;
        let book = records
            .books
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Some(message) = patch.validate() {
            return Err(StoreError::Validation(message));
        }

        book.apply(patch, Utc::now());
        Ok(book.clone())
    }

    async fn delete_by_id(&self, id: &BookId) -> Result<Book, StoreError> {
        let mut records = self.records.write().await;
        let book = records
            .books
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        records.order.retain(|existing| existing != id);
        records.retired.insert(*id);
        debug!(%id, "record removed");

        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_assigns_id() {
        let store = InMemoryRecordStore::new();

        let book = store
            .create(NewBook::new("Dune", "Herbert", 1965))
            .await
            .unwrap();

        assert_eq!(store.get_by_id(&book.id).await.unwrap(), book);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let store = InMemoryRecordStore::new();

        let result = store.create(NewBook::new("", "Herbert", 1965)).await;

        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_get_all_keeps_insertion_order() {
        let store = InMemoryRecordStore::new();

        let a = store.create(NewBook::new("A", "x", 1)).await.unwrap();
        let b = store.create(NewBook::new("B", "y", 2)).await.unwrap();
        let c = store.create(NewBook::new("C", "z", 3)).await.unwrap();
        store.delete_by_id(&b.id).await.unwrap();

        let ids: Vec<BookId> = store
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|book| book.id)
            .collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[tokio::test]
    async fn test_update_in_place() {
        let store = InMemoryRecordStore::new();
        let book = store
            .create(NewBook::new("Dune", "Herbert", 1965))
            .await
            .unwrap();

        let patch = BookPatch {
            year: Some(1966),
            ..Default::default()
        };
        let updated = store.update_by_id(&book.id, patch).await.unwrap();

        assert_eq!(updated.id, book.id);
        assert_eq!(updated.year, 1966);
        assert_eq!(updated.created_at, book.created_at);
        assert_eq!(store.get_by_id(&book.id).await.unwrap().year, 1966);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let store = InMemoryRecordStore::new();

        let result = store
            .update_by_id(&BookId::generate(), BookPatch::default())
            .await;

        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_rejects_blank_author() {
        let store = InMemoryRecordStore::new();
        let book = store
            .create(NewBook::new("Dune", "Herbert", 1965))
            .await
            .unwrap();

        let patch = BookPatch {
            author: Some(" ".to_string()),
            ..Default::default()
        };
        let result = store.update_by_id(&book.id, patch).await;

        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert_eq!(store.get_by_id(&book.id).await.unwrap().author, "Herbert");
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let store = InMemoryRecordStore::new();
        let book = store
            .create(NewBook::new("Dune", "Herbert", 1965))
            .await
            .unwrap();

        assert_eq!(store.delete_by_id(&book.id).await.unwrap().id, book.id);
        assert!(matches!(
            store.delete_by_id(&book.id).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.get_by_id(&book.id).await,
            Err(StoreError::NotFound(_))
        ));
    }
}
