use async_trait::async_trait;
use sqlx::MySqlPool;
use time::PrimitiveDateTime;

use super::{BookStore, StoreResult};
use crate::modules::books::models::{Book, BookFields, BookSummary};

const BOOK_COLUMNS: &str = "id, name, year, author, summary, publisher, pageCount, readPage, \
                            reading, finished, insertedAt, updatedAt";

/// `books` table access through a shared pool.
///
/// Each call checks a connection out of the pool for a single statement and
/// returns it when the statement completes, whatever the outcome.
#[derive(Clone)]
pub struct MySqlBookStore {
    pool: MySqlPool,
}

impl MySqlBookStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for MySqlBookStore {
    async fn insert(&self, book: &Book) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO books (id, name, year, author, summary, publisher, pageCount, readPage, \
             reading, finished, insertedAt, updatedAt) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&book.id)
        .bind(&book.name)
        .bind(book.year)
        .bind(&book.author)
        .bind(&book.summary)
        .bind(&book.publisher)
        .bind(book.page_count)
        .bind(book.read_page)
        .bind(book.reading)
        .bind(book.finished)
        .bind(book.inserted_at)
        .bind(book.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<BookSummary>> {
        let books = sqlx::query_as::<_, BookSummary>("SELECT id, name, publisher FROM books")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Book>> {
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ? LIMIT 1");
        let book = sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn update(
        &self,
        id: &str,
        fields: &BookFields,
        updated_at: PrimitiveDateTime,
    ) -> StoreResult<u64> {
        let result = sqlx::query(
            "UPDATE books SET name = ?, year = ?, author = ?, summary = ?, publisher = ?, \
             pageCount = ?, readPage = ?, reading = ?, updatedAt = ? WHERE id = ?",
        )
        .bind(&fields.name)
        .bind(fields.year)
        .bind(&fields.author)
        .bind(&fields.summary)
        .bind(&fields.publisher)
        .bind(fields.page_count)
        .bind(fields.read_page)
        .bind(fields.reading)
        .bind(updated_at)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &str) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
