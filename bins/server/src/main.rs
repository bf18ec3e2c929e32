//! Tesouraria API Server
//!
//! Main entry point for the receivables and bank reconciliation service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tesouraria_api::{AppState, create_router};
use tesouraria_core::SystemClock;
use tesouraria_db::{ReceivableRepository, connect_with_config};
use tesouraria_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tesouraria=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Connect to database
    let db = connect_with_config(&config.database).await?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    // Create application state
    let state = AppState::new(
        ReceivableRepository::new(db),
        Arc::new(SystemClock),
        config.import.clone(),
    );
    info!(
        max_file_bytes = config.import.max_file_bytes,
        "Bank file import configured"
    );

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
