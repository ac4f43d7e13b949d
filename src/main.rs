use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use election_map_api::app::{app, AppState};
use election_map_api::area::{AreaService, DEFAULT_CODES};
use election_map_api::config;
use election_map_api::database::{DatabaseManager, PgAreaStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, API_PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Election Map API in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to the results database")?;
    if config.database.run_migrations {
        DatabaseManager::migrate(&pool).await?;
    }

    let store = Arc::new(PgAreaStore::new(pool));
    let service = AreaService::from_config(store, DEFAULT_CODES, &config.area);
    let app = app(AppState::new(service), config);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Election Map API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
