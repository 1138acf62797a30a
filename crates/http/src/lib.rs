//! HTTP server facade for bookshelf with Axum, the response envelope, and OpenAPI support.

use std::{future::IntoFuture, time::Duration};

use anyhow::Context;
use axum::{routing::get, Router};

use bookshelf_kernel::{settings::Settings, ModuleRegistry};

pub mod error;
pub mod response;
pub mod router;

pub use error::{AppError, AppResult};
pub use response::{ApiResponse, Envelope, Status};

use router::RouterBuilder;

/// Start the HTTP server with the given module registry.
///
/// Returns once `shutdown` resolves and in-flight requests have drained,
/// or after `server.shutdown_timeout_ms` if they have not.
pub async fn start_server<F>(
    registry: &ModuleRegistry,
    settings: &Settings,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let address = format!("{}:{}", settings.server.host, settings.server.port);
    tracing::info!("starting HTTP server on {}", address);

    let app = build_router(registry, settings);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to address {address}"))?;

    tracing::info!("HTTP server listening on http://{}", address);

    let (drain_tx, drain_rx) = tokio::sync::oneshot::channel::<()>();
    let signal = async move {
        shutdown.await;
        tracing::info!("shutdown signal received, draining connections");
        let _ = drain_tx.send(());
    };

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .into_future();
    let grace = Duration::from_millis(settings.server.shutdown_timeout_ms);

    tokio::select! {
        served = server => served.context("HTTP server failed")?,
        _ = async {
            let _ = drain_rx.await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(
                timeout_ms = settings.server.shutdown_timeout_ms,
                "connections still open after shutdown timeout, closing"
            );
        }
    }

    Ok(())
}

/// Build the main HTTP router with all module routes mounted
pub fn build_router(registry: &ModuleRegistry, settings: &Settings) -> Router {
    let mut router_builder = RouterBuilder::new().route("/healthz", get(health_check));

    for module in registry.modules() {
        let module_name = module.name();
        tracing::info!(
            module = module_name,
            "mounting module routes under /{}",
            module_name
        );
        router_builder = router_builder.mount_module(module_name, module.routes());
    }

    // Layers only wrap routes added before them
    router_builder
        .with_openapi(registry)
        .with_request_id()
        .with_cors()
        .with_tracing()
        .build()
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}
