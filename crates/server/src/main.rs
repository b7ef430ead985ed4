use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use steamcharts_core::{
    load_config, validate_config, CatalogSync, GameStore, SqliteGameStore, SteamApi, SteamClient,
};
use steamcharts_server::api::create_router;
use steamcharts_server::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("STEAMCHARTS_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Database path: {:?}", config.database.path);
    info!("Enrichment policy: {:?}", config.sync.enrich_policy);

    let store: Arc<dyn GameStore> = Arc::new(
        SqliteGameStore::new(&config.database.path).context("Failed to open game catalog")?,
    );
    info!("Game catalog initialized");

    let steam: Arc<dyn SteamApi> =
        Arc::new(SteamClient::new(&config.steam).context("Failed to create Steam client")?);
    info!(
        "Steam client initialized (api: {}, store: {})",
        config.steam.api_base_url, config.steam.store_base_url
    );

    let sync = Arc::new(
        CatalogSync::new(store, steam, config.steam.api_key.clone())
            .with_policy(config.sync.enrich_policy),
    );

    let state = Arc::new(AppState::new(config.clone(), sync));

    // Bootstrap the catalog in the background so the server answers immediately
    if config.sync.bootstrap_on_start {
        let home = Arc::clone(state.home());
        tokio::spawn(async move {
            match home.initialize().await {
                Ok(home_state) => info!(
                    "Home view ready with {} top games",
                    home_state.top_games.len()
                ),
                Err(e) => error!("Catalog bootstrap failed: {}", e),
            }
        });
    } else {
        warn!("Catalog bootstrap disabled; use POST /api/v1/catalog/repopulate");
    }

    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
