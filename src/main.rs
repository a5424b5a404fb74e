use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use ghl_dashboard_api::config::AppConfig;
use ghl_dashboard_api::crm::GhlClient;
use ghl_dashboard_api::database::{DatabaseManager, PgIntegrationStore};
use ghl_dashboard_api::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, GHL_API_BASE_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ghl_dashboard_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!("Starting GHL Dashboard API in {:?} mode", config.environment);

    let db = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    let crm = GhlClient::new(&config.crm).context("failed to build GHL client")?;

    let state = AppState::new(Arc::new(PgIntegrationStore::new(db.clone())), Arc::new(crm));
    let app = ghl_dashboard_api::app(state, &config);

    let bind_addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("GHL Dashboard API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
