#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use bookshelf::modules::{self, books::store::BookStore};
use bookshelf_kernel::{settings::Settings, ModuleRegistry};

/// Build the full application router over the given store.
///
/// Mirrors the bootstrap in `main.rs` so tests run through the same
/// middleware stack production uses.
pub fn build_test_app(store: Arc<dyn BookStore>) -> Router {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, store).expect("module registration");
    bookshelf_http::build_router(&registry, &Settings::default())
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<String>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(text) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(text)
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(json.to_string())).await
}

pub async fn put_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(json.to_string())).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Status code and decoded body in one go.
pub async fn read(response: Response<Body>) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    (status, body_json(response).await)
}
