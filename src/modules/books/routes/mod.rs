//! HTTP routes for the books module.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use bookshelf_http::{ApiResponse, AppError, AppResult};

use super::handler::{BookCreated, BookDetail, BookHandler, BookList};
use super::models::BookPayload;

/// Routes relative to the module mount point (`/books`).
pub fn router(handler: BookHandler) -> Router {
    Router::new()
        .route("/", post(create_book).get(list_books))
        .route(
            "/{book_id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(handler)
}

fn reject_payload(rejection: JsonRejection) -> AppError {
    tracing::debug!(reason = %rejection.body_text(), "unreadable book payload");
    AppError::bad_request("invalid request payload")
}

async fn create_book(
    State(handler): State<BookHandler>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> AppResult<ApiResponse<BookCreated>> {
    let Json(payload) = payload.map_err(reject_payload)?;
    handler.create(payload).await
}

async fn list_books(State(handler): State<BookHandler>) -> AppResult<ApiResponse<BookList>> {
    handler.list().await
}

async fn get_book(
    State(handler): State<BookHandler>,
    Path(book_id): Path<String>,
) -> AppResult<ApiResponse<BookDetail>> {
    handler.get(&book_id).await
}

async fn update_book(
    State(handler): State<BookHandler>,
    Path(book_id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> AppResult<ApiResponse> {
    let Json(payload) = payload.map_err(reject_payload)?;
    handler.update(&book_id, payload).await
}

async fn delete_book(
    State(handler): State<BookHandler>,
    Path(book_id): Path<String>,
) -> AppResult<ApiResponse> {
    handler.delete(&book_id).await
}
