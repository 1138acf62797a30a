//! Persistence seam for the books module.

mod memory;
mod mysql;

pub use memory::InMemoryBookStore;
pub use mysql::MySqlBookStore;

use async_trait::async_trait;
use thiserror::Error;
use time::PrimitiveDateTime;

use super::models::{Book, BookFields, BookSummary};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage for book records. Every method issues exactly one statement.
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn insert(&self, book: &Book) -> StoreResult<()>;

    /// All books as `{id, name, publisher}`, in store order
    async fn list(&self) -> StoreResult<Vec<BookSummary>>;

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Book>>;

    /// Overwrite the mutable fields of `id`; returns the number of rows matched
    async fn update(
        &self,
        id: &str,
        fields: &BookFields,
        updated_at: PrimitiveDateTime,
    ) -> StoreResult<u64>;

    /// Returns the number of rows removed
    async fn delete(&self, id: &str) -> StoreResult<u64>;
}
