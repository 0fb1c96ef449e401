// Main entry point for the PM Insights API server

use std::sync::Arc;

use anyhow::{Context, Result};
use llm_client::LlmClient;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use insights::{FsObjectStore, GatewayModel, PostgresStore};
use server_core::kernel::ServerDeps;
use server_core::server::build_app;
use server_core::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,insights=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting PM Insights API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Create store (runs inline schema migrations)
    let store = PostgresStore::from_pool(pool.clone())
        .await
        .context("Failed to initialize store")?;

    // Object store for raw uploads
    let objects = FsObjectStore::new(&config.storage_root);

    // LLM-backed insight model
    let client = LlmClient::new(config.llm_api_key.clone()).with_base_url(config.llm_base_url.clone());
    let model = GatewayModel::new(client, config.llm_model.clone());

    let deps = Arc::new(ServerDeps::new(
        Arc::new(store),
        Arc::new(objects),
        Arc::new(model),
        config.default_owner_id,
    ));

    // Build application
    let app = build_app(deps, Some(pool));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
