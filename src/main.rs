//! Try Local Gresham - Marketplace Services Entry Point
//!
//! REST API server for the local-business marketplace: pickup slot
//! scheduling and the Stripe Connect payment account lifecycle.
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Wire the Postgres repository and Stripe client into shared state
//! 5. Build HTTP router and start serving on the configured port

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use gresham_market_server::{
    config::Config, db, payments::StripeClient, repository::PgBusinessRepository, router,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Create database pool
    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    // Run migrations
    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let public_base = url::Url::parse(&config.public_base_url)
        .with_context(|| format!("invalid PUBLIC_BASE_URL: {}", config.public_base_url))?;

    if config.stripe_webhook_secret.is_none() {
        tracing::warn!("STRIPE_WEBHOOK_SECRET not set; inbound payment webhooks will be rejected");
    }

    let state = AppState {
        repo: Arc::new(PgBusinessRepository::new(pool)),
        payments: Arc::new(StripeClient::new(
            &config.stripe_api_base,
            &config.stripe_secret_key,
        )?),
        slots: config.slot_config(),
        public_base,
        webhook_secret: config.stripe_webhook_secret.clone(),
    };

    let app = router(state);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Start serving HTTP requests
    // This blocks forever, handling requests concurrently with tokio
    axum::serve(listener, app).await?;

    Ok(())
}
