use async_trait::async_trait;
use time::PrimitiveDateTime;
use tokio::sync::RwLock;

use super::{BookStore, StoreError, StoreResult};
use crate::modules::books::models::{Book, BookFields, BookSummary};

/// Process-local store keeping rows in insertion order.
///
/// Used for tests and local runs without a database; each instance is
/// isolated from every other.
#[derive(Debug, Default)]
pub struct InMemoryBookStore {
    books: RwLock<Vec<Book>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows
    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn insert(&self, book: &Book) -> StoreResult<()> {
        let mut books = self.books.write().await;
        if books.iter().any(|existing| existing.id == book.id) {
            return Err(StoreError::Unavailable(format!(
                "duplicate primary key '{}'",
                book.id
            )));
        }
        books.push(book.clone());
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<BookSummary>> {
        Ok(self.books.read().await.iter().map(BookSummary::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Book>> {
        Ok(self
            .books
            .read()
            .await
            .iter()
            .find(|book| book.id == id)
            .cloned())
    }

    async fn update(
        &self,
        id: &str,
        fields: &BookFields,
        updated_at: PrimitiveDateTime,
    ) -> StoreResult<u64> {
        let mut books = self.books.write().await;
        match books.iter_mut().find(|book| book.id == id) {
            Some(book) => {
                book.apply(fields, updated_at);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: &str) -> StoreResult<u64> {
        let mut books = self.books.write().await;
        let before = books.len();
        books.retain(|book| book.id != id);
        Ok((before - books.len()) as u64)
    }
}
