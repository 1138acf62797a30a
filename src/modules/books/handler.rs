//! Book resource handler: validation, one store call, envelope shaping.

use std::sync::Arc;

use anyhow::Context;
use bookshelf_http::{ApiResponse, AppError, AppResult};
use serde::Serialize;

use super::models::{now_timestamp, Book, BookPayload, BookSummary, PayloadError, WriteAction};
use super::store::BookStore;
use crate::utils::short_id;

pub const BOOK_ID_LENGTH: usize = 10;

/// `data` of a successful create
#[derive(Debug, Clone, Serialize)]
pub struct BookCreated {
    #[serde(rename = "bookId")]
    pub book_id: String,
}

/// `data` of a successful list
#[derive(Debug, Clone, Serialize)]
pub struct BookList {
    pub books: Vec<BookSummary>,
}

/// `data` of a successful lookup
#[derive(Debug, Clone, Serialize)]
pub struct BookDetail {
    pub book: Book,
}

impl From<PayloadError> for AppError {
    fn from(err: PayloadError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// Stateless between calls; all state lives in the injected store.
#[derive(Clone)]
pub struct BookHandler {
    store: Arc<dyn BookStore>,
}

impl BookHandler {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, payload: BookPayload) -> AppResult<ApiResponse<BookCreated>> {
        let fields = payload.validate(WriteAction::Add)?;
        let book = Book::new(short_id(BOOK_ID_LENGTH), fields, now_timestamp());

        self.store
            .insert(&book)
            .await
            .with_context(|| format!("failed to insert book '{}'", book.id))?;

        tracing::info!(book_id = %book.id, "book added");
        Ok(ApiResponse::created()
            .with_message("book added successfully")
            .with_data(BookCreated { book_id: book.id }))
    }

    pub async fn list(&self) -> AppResult<ApiResponse<BookList>> {
        let books = self.store.list().await.context("failed to list books")?;

        Ok(ApiResponse::ok().with_data(BookList { books }))
    }

    pub async fn get(&self, id: &str) -> AppResult<ApiResponse<BookDetail>> {
        let book = self
            .store
            .find_by_id(id)
            .await
            .with_context(|| format!("failed to fetch book '{id}'"))?
            .ok_or_else(|| AppError::not_found("book not found"))?;

        Ok(ApiResponse::ok().with_data(BookDetail { book }))
    }

    pub async fn update(&self, id: &str, payload: BookPayload) -> AppResult<ApiResponse> {
        let fields = payload.validate(WriteAction::Update)?;

        let matched = self
            .store
            .update(id, &fields, now_timestamp())
            .await
            .with_context(|| format!("failed to update book '{id}'"))?;

        if matched == 0 {
            return Err(AppError::not_found("failed to update book: id not found"));
        }

        tracing::info!(book_id = %id, "book updated");
        Ok(ApiResponse::ok().with_message("book updated successfully"))
    }

    pub async fn delete(&self, id: &str) -> AppResult<ApiResponse> {
        let removed = self
            .store
            .delete(id)
            .await
            .with_context(|| format!("failed to delete book '{id}'"))?;

        if removed == 0 {
            return Err(AppError::not_found("failed to delete book: id not found"));
        }

        tracing::info!(book_id = %id, "book deleted");
        Ok(ApiResponse::ok().with_message("book deleted successfully"))
    }
}
