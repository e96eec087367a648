//! Runs the docket task service.
//!
//! Configuration is read from the environment, optionally seeded by a
//! `.env` file; see [`docket::config`] for the recognised variables.

use std::error::Error;
use std::sync::Arc;

use docket::config::{ServiceConfig, StorageMode};
use docket::http::{AppState, router};
use docket::task::adapters::{
    memory::InMemoryTaskStore,
    postgres::{PostgresTaskStore, build_pool},
};
use docket::task::ports::TaskStore;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type BoxError = Box<dyn Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,docket=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServiceConfig::from_env()?;
    tracing::info!(
        listen_addr = %config.listen_addr,
        storage_mode = ?config.storage_mode,
        timeout = ?config.operation_timeout,
        "configuration loaded"
    );

    let store = connect_store(&config).await?;
    let app = router(AppState::new(store, config.operation_timeout));

    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

async fn connect_store(config: &ServiceConfig) -> Result<Arc<dyn TaskStore>, BoxError> {
    match (config.storage_mode, config.database_url.clone()) {
        (StorageMode::Postgres, Some(url)) => {
            let pool_size = config.database_pool_size;
            let pool =
                tokio::task::spawn_blocking(move || build_pool(&url, pool_size)).await??;
            let store = PostgresTaskStore::new(pool);
            store.ensure_schema().await?;
            tracing::info!(pool_size, "connected to PostgreSQL task store");
            Ok(Arc::new(store))
        }
        (StorageMode::Postgres, None) => {
            Err(docket::config::ConfigurationError::MissingDatabaseUrl.into())
        }
        (StorageMode::InMemory, _) => {
            tracing::info!("using in-memory task store");
            Ok(Arc::new(InMemoryTaskStore::new()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
