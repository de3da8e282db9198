//! DocTajus Server: legal practice management backend
//!
//! Main entry point that wires all crates together and starts the server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use doctajus_core::config::AppConfig;
use doctajus_core::error::AppError;
use doctajus_database::DatabasePool;
use doctajus_database::repositories::documento::DocumentoRepository;
use doctajus_storage::{LocalStorageProvider, UploadStore};
use doctajus_worker::{FailureReporter, IndexingRunner, index_channel};

#[tokio::main]
async fn main() {
    let env = std::env::var("DOCTAJUS_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting DocTajus v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let database = DatabasePool::connect(&config.database).await?;
    doctajus_database::migration::run_migrations(database.pool()).await?;

    // ── Step 2: Upload storage ───────────────────────────────────
    let provider = Arc::new(LocalStorageProvider::new(&config.storage.upload_dir).await?);
    tracing::info!(root = %provider.root().display(), "Upload storage ready");
    let uploads = UploadStore::new(provider.clone());

    // ── Step 3: Background indexing ──────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (index_queue, index_jobs, index_failures) =
        index_channel(config.storage.index_queue_capacity);

    let runner = IndexingRunner::new(
        provider,
        Arc::new(DocumentoRepository::new(database.pool().clone())),
        index_queue.failure_sender(),
    );
    let runner_handle = tokio::spawn(runner.run(index_jobs, shutdown_rx));
    let reporter_handle = tokio::spawn(FailureReporter::new(index_failures).run());

    // ── Step 4: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = doctajus_api::build_state(config, database.pool().clone(), uploads, index_queue);
    let app = doctajus_api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("DocTajus server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    })
    .await
    .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 5: Drain background tasks ───────────────────────────
    if tokio::time::timeout(grace, runner_handle).await.is_err() {
        tracing::warn!("Indexing worker did not stop within the grace period");
    }
    match tokio::time::timeout(grace, reporter_handle).await {
        Ok(Ok(reported)) => tracing::info!(reported, "Indexing failure reporter stopped"),
        Ok(Err(e)) => tracing::warn!(error = %e, "Indexing failure reporter panicked"),
        Err(_) => tracing::warn!("Indexing failure reporter did not stop within the grace period"),
    }

    database.close().await;
    tracing::info!("DocTajus server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received");
}
