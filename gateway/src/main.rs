use std::net::SocketAddr;

use taxihub_gateway::client::DriverServiceClient;
use taxihub_gateway::config::GatewayConfig;
use taxihub_gateway::handlers::AppState;
use taxihub_gateway::rate_limit::RateLimiter;
use taxihub_gateway::routes::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = GatewayConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    tracing::info!("Starting gateway on {}", config.bind_addr);
    tracing::info!("Driver service: {}", config.driver_service_url);

    let client = DriverServiceClient::new(&config.driver_service_url, config.upstream_timeout)?;

    let limiter = RateLimiter::new(config.rate_limit);
    if config.rate_limit.enabled {
        tracing::info!(
            "Rate limit: {} requests per {:?} per client",
            config.rate_limit.requests,
            config.rate_limit.window
        );
    } else {
        tracing::info!("Rate limiting disabled");
    }
    let cleanup = limiter.spawn_cleanup();

    let app = build_router(AppState { client, limiter });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Gateway listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    cleanup.abort();
    tracing::info!("Gateway stopped");
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
