//! Cart API server binary.
//!
//! Wires configuration, Redis, the catalogue client and the HTTP router
//! together, then serves until SIGINT/SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use trolley_cart_api::catalogue::CatalogueClient;
use trolley_cart_api::config::AppConfig;
use trolley_cart_api::routes;
use trolley_cart_api::services::cart_service::CartService;
use trolley_store::RedisCartStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(true)
        .init();

    info!("Starting Trolley cart API...");

    // Load configuration
    let config = AppConfig::load()?;
    info!(
        port = config.listen_port,
        redis = %config.redis_url,
        catalogue = %config.catalogue_url,
        ttl_secs = config.cart_ttl_secs,
        "Configuration loaded"
    );

    // Connect to Redis
    let store = RedisCartStore::connect(&config.redis_url).await?;
    info!("Connected to Redis");

    // Build the engine and its collaborators
    let catalogue = CatalogueClient::new(config.catalogue_url.clone());
    let engine = Arc::new(CartService::new(store, catalogue, config.cart_ttl()));

    // Bind and serve
    let app = routes::router(engine);
    let addr: SocketAddr = format!("0.0.0.0:{}", config.listen_port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Cart API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
