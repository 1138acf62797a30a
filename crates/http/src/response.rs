//! The `{status, message?, data?}` envelope every endpoint answers with.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Outcome class carried in the envelope's `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    /// Caller-caused condition (4xx)
    Fail,
    /// Internal condition (5xx)
    Error,
}

/// Response body shared by all endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T = ()> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// A successful envelope paired with its HTTP status code.
#[derive(Debug, Clone)]
pub struct ApiResponse<T = ()> {
    status_code: StatusCode,
    envelope: Envelope<T>,
}

impl<T> ApiResponse<T> {
    /// `200 OK` success envelope
    pub fn ok() -> Self {
        Self::success(StatusCode::OK)
    }

    /// `201 Created` success envelope
    pub fn created() -> Self {
        Self::success(StatusCode::CREATED)
    }

    fn success(status_code: StatusCode) -> Self {
        Self {
            status_code,
            envelope: Envelope {
                status: Status::Success,
                message: None,
                data: None,
            },
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.envelope.message = Some(message.into());
        self
    }

    pub fn with_data(mut self, data: T) -> Self {
        self.envelope.data = Some(data);
        self
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn envelope(&self) -> &Envelope<T> {
        &self.envelope
    }

    pub fn into_envelope(self) -> Envelope<T> {
        self.envelope
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status_code, Json(self.envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::json;

    #[derive(Serialize)]
    struct Created {
        #[serde(rename = "bookId")]
        book_id: &'static str,
    }

    #[test]
    fn envelope_omits_absent_fields() {
        let envelope: Envelope = ApiResponse::ok().into_envelope();
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"status": "success"})
        );
    }

    #[test]
    fn created_response_carries_message_and_data() {
        let response = ApiResponse::created()
            .with_message("book added successfully")
            .with_data(Created {
                book_id: "abc123XYZ_",
            });

        assert_eq!(response.status_code(), StatusCode::CREATED);
        assert_eq!(
            serde_json::to_value(response.envelope()).unwrap(),
            json!({
                "status": "success",
                "message": "book added successfully",
                "data": {"bookId": "abc123XYZ_"}
            })
        );
    }

    #[tokio::test]
    async fn into_response_writes_json_body() {
        let response = ApiResponse::<()>::ok()
            .with_message("book deleted successfully")
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"],
            "application/json"
        );

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({"status": "success", "message": "book deleted successfully"})
        );
    }
}
