pub mod handler;
pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{InitCtx, Module};
use serde_json::json;

use handler::BookHandler;
use store::BookStore;

/// Book catalogue module, mounted under `/books`
pub struct BooksModule {
    handler: BookHandler,
}

impl BooksModule {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self {
            handler: BookHandler::new(store),
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.handler.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let envelope = json!({"$ref": "#/components/schemas/Envelope"});
        let envelope_response = |description: &str| {
            json!({
                "description": description,
                "content": {"application/json": {"schema": envelope}}
            })
        };
        let book_id_param = json!({
            "name": "bookId",
            "in": "path",
            "required": true,
            "schema": {"type": "string"}
        });
        let payload_body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": {"$ref": "#/components/schemas/BookPayload"}
                }
            }
        });

        Some(json!({
            "paths": {
                "": {
                    "post": {
                        "summary": "Add a book",
                        "tags": ["Books"],
                        "requestBody": payload_body,
                        "responses": {
                            "201": envelope_response("Book added; data.bookId holds the new id"),
                            "400": envelope_response("Missing name, readPage > pageCount, or unreadable body"),
                            "500": envelope_response("Internal server error")
                        }
                    },
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": envelope_response("data.books holds BookSummary items"),
                            "500": envelope_response("Internal server error")
                        }
                    }
                },
                "/{bookId}": {
                    "get": {
                        "summary": "Get a book",
                        "tags": ["Books"],
                        "parameters": [book_id_param],
                        "responses": {
                            "200": envelope_response("data.book holds the Book"),
                            "404": envelope_response("Book not found"),
                            "500": envelope_response("Internal server error")
                        }
                    },
                    "put": {
                        "summary": "Update a book",
                        "tags": ["Books"],
                        "parameters": [book_id_param],
                        "requestBody": payload_body,
                        "responses": {
                            "200": envelope_response("Book updated"),
                            "400": envelope_response("Missing name, readPage > pageCount, or unreadable body"),
                            "404": envelope_response("Id not found"),
                            "500": envelope_response("Internal server error")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": [book_id_param],
                        "responses": {
                            "200": envelope_response("Book deleted"),
                            "404": envelope_response("Id not found"),
                            "500": envelope_response("Internal server error")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": {"type": "string", "description": "Generated 10-character id"},
                            "name": {"type": "string"},
                            "year": {"type": ["integer", "null"]},
                            "author": {"type": ["string", "null"]},
                            "summary": {"type": ["string", "null"]},
                            "publisher": {"type": ["string", "null"]},
                            "pageCount": {"type": "integer"},
                            "readPage": {"type": "integer"},
                            "reading": {"type": "boolean"},
                            "finished": {"type": "boolean"},
                            "insertedAt": {"type": "string", "example": "2024-03-01 08:15:30"},
                            "updatedAt": {"type": "string", "example": "2024-03-01 08:15:30"}
                        },
                        "required": [
                            "id", "name", "pageCount", "readPage", "reading",
                            "finished", "insertedAt", "updatedAt"
                        ]
                    },
                    "BookSummary": {
                        "type": "object",
                        "properties": {
                            "id": {"type": "string"},
                            "name": {"type": "string"},
                            "publisher": {"type": ["string", "null"]}
                        },
                        "required": ["id", "name"]
                    },
                    "BookPayload": {
                        "type": "object",
                        "properties": {
                            "name": {"type": "string"},
                            "year": {"type": "integer"},
                            "author": {"type": "string"},
                            "summary": {"type": "string"},
                            "publisher": {"type": "string"},
                            "pageCount": {"type": "integer", "default": 0},
                            "readPage": {"type": "integer", "default": 0},
                            "reading": {"type": "boolean", "default": false}
                        },
                        "required": ["name"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module over the given store
pub fn create_module(store: Arc<dyn BookStore>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(store))
}
