use std::sync::Arc;

use anyhow::Context;
use bookshelf::modules::{self, books::store::MySqlBookStore};
use bookshelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("failed to load bookshelf settings: {err:#}");
            std::process::exit(1);
        }
    };

    if let Err(err) = bookshelf_telemetry::init(&settings.telemetry) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
    bookshelf_telemetry::install_panic_hook();

    if let Err(err) = run(settings).await {
        tracing::error!(error = ?err, "bookshelf terminated");
        std::process::exit(1);
    }
}

async fn run(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.redacted_url(),
        "bookshelf bootstrap starting"
    );

    let pool = bookshelf_db::create_pool(&settings.database)
        .await
        .context("database unavailable at startup")?;

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, Arc::new(MySqlBookStore::new(pool.clone())))?;

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    tracing::info!("bookshelf bootstrap complete");

    bookshelf_http::start_server(&registry, &settings, shutdown_signal()).await?;

    registry.stop_modules().await?;
    pool.close().await;
    tracing::info!("bookshelf stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
