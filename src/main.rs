mod assignment;
mod db;
mod error;
mod extract;
mod middleware;
mod notification;
mod routes;
mod state;

use anyhow::Context;
use assignment::SnapshotRepository;
use db::{create_pool, run_migrations};
use notification::{NotificationDispatcher, SlackClient};
use routes::create_router;
use state::{AppState, Config};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,classroom_notifier=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env().context("Invalid configuration")?);

    tracing::info!("Connecting to database...");
    let db = create_pool(&config.database_url)
        .await
        .with_context(|| format!("Failed to open {}", config.database_url))?;

    tracing::info!("Running migrations...");
    run_migrations(&db).await.context("Failed to run migrations")?;

    let snapshot_store = Arc::new(SnapshotRepository::new(db));
    let slack = SlackClient::new(&config.slack_api_url, &config.slack_token)
        .context("Failed to build Slack client")?;

    let dispatcher = NotificationDispatcher::new(
        snapshot_store.clone(),
        Arc::new(slack),
        config.slack_owner_id.clone(),
        config.slack_channel_id.clone(),
    );

    // Create application state
    let state = AppState {
        config: config.clone(),
        snapshot_store,
        dispatcher,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = config.server_address();

    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
