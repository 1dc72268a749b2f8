use std::sync::Arc;

use taxihub::config::ServiceConfig;
use taxihub::drivers::DriverService;
use taxihub::routes::build_router;
use taxihub::storage::InMemoryDriverStore;
use taxihub::storage::seed::{load_seed_file, seed_store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    tracing::info!("Starting driver service on {}", config.bind_addr);
    tracing::info!(
        "Nearby radius: {} km, store timeout: {:?}",
        config.radius_km,
        config.store_timeout
    );

    // 1. Storage layer:
    let store = Arc::new(InMemoryDriverStore::new());
    if let Some(path) = &config.seed_file {
        let documents = load_seed_file(path)?;
        let count = seed_store(&store, documents);
        tracing::info!("Seeded {} driver documents from {}", count, path.display());
    }

    // 2. Service:
    let service = DriverService::new(store, config.service_settings());

    // 3. HTTP Router:
    let app = build_router(service);

    // 4. Start HTTP server:
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("HTTP server listening on {}", listener.local_addr()?);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Driver service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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
