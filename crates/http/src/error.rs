//! Error handling for the bookshelf HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::response::{Envelope, Status};

/// Message returned in place of any internal failure detail.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Application error types that map to envelope responses
#[derive(Error, Debug)]
pub enum AppError {
    /// Caller input rejected before touching the store
    #[error("validation error: {0}")]
    Validation(String),

    /// Request body could not be decoded
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Envelope shown to the caller; internal detail never leaves the process.
    pub fn envelope(&self) -> Envelope {
        let (status, message) = match self {
            AppError::Validation(message)
            | AppError::BadRequest(message)
            | AppError::NotFound(message) => (Status::Fail, message.clone()),
            AppError::Internal(_) => (Status::Error, INTERNAL_ERROR_MESSAGE.to_string()),
        };

        Envelope {
            status,
            message: Some(message),
            data: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::Internal(e) => {
                let error_id = Uuid::now_v7();
                tracing::error!(
                    error_id = %error_id,
                    status_code = %status.as_u16(),
                    error.cause_chain = ?e,
                    error.message = %e,
                    "request failed"
                );
            }
            other => {
                tracing::debug!(
                    status_code = %status.as_u16(),
                    reason = %other,
                    "request rejected"
                );
            }
        }

        (status, Json(self.envelope())).into_response()
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::json;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_validation_error() {
        let error = AppError::validation("failed to add book: please provide the book name");
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.envelope().status, Status::Fail);
    }

    #[tokio::test]
    async fn test_not_found_response_format() {
        let response = AppError::not_found("book not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({"status": "fail", "message": "book not found"})
        );
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let internal_error = anyhow::anyhow!("Access denied for user 'root'@'10.0.0.4'");
        let response = AppError::Internal(internal_error).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(
            body,
            json!({"status": "error", "message": "internal server error"})
        );
        assert!(!body.to_string().contains("Access denied"));
    }

    #[test]
    fn test_anyhow_converts_into_internal() {
        fn fails() -> AppResult<()> {
            let acquired: anyhow::Result<()> = Err(anyhow::anyhow!("pool timed out"));
            acquired?;
            Ok(())
        }

        assert!(matches!(fails(), Err(AppError::Internal(_))));
    }
}
