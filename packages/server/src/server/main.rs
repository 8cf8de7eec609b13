// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use server_core::domains::careers::{AggregateOptions, DEFAULT_PAGE_SIZE};
use server_core::domains::jobs::JobStore;
use server_core::kernel::{run_purge, start_scheduler, GoogleSearchClient};
use server_core::server::{build_app, AppState};
use server_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting Jobscout API");

    // Load configuration (fails fast on missing secrets)
    let config = Config::from_env().context("Failed to load configuration")?;

    fn mask_env(name: &str) {
        match std::env::var(name) {
            Ok(val) if val.is_empty() => tracing::info!("  {}: (empty)", name),
            Ok(val) => {
                let show = std::cmp::min(4, val.len());
                tracing::info!(
                    "  {}: {}{}  ({} chars)",
                    name,
                    val.get(..show).unwrap_or_default(),
                    "*".repeat(val.len().saturating_sub(show)),
                    val.len()
                );
            }
            Err(_) => tracing::warn!("  {}: NOT SET", name),
        }
    }
    tracing::info!("Environment variables:");
    for name in &["DATABASE_URL", "GOOGLE_API_KEY", "GOOGLE_SEARCH_ENGINE_ID"] {
        mask_env(name);
    }

    // Connect to database
    tracing::info!("Connecting to database...");
    let job_store = JobStore::connect(&config.database_url, config.database_max_connections).await?;
    tracing::info!("Database connected");

    // An unusable schema is fatal
    job_store
        .initialize_schema()
        .await
        .context("Failed to initialize database schema")?;

    run_purge(&job_store, config.job_retention_days).await;

    // A bad schedule disables the periodic purge, not the service
    let _scheduler = match &config.purge_cron {
        Some(cron) => {
            match start_scheduler(job_store.clone(), cron, config.job_retention_days).await {
                Ok(scheduler) => Some(scheduler),
                Err(e) => {
                    tracing::error!(
                        schedule = %cron,
                        error = %format!("{:#}", e),
                        "Failed to start purge scheduler, old jobs are purged at startup only"
                    );
                    None
                }
            }
        }
        None => {
            tracing::info!("PURGE_CRON not set, old jobs are purged at startup only");
            None
        }
    };

    let search_service = GoogleSearchClient::new(
        config.google_api_key.clone(),
        config.google_search_engine_id.clone(),
        config.search_timeout,
    )?;

    let aggregate_options = AggregateOptions {
        max_pages: config.search_max_pages,
        page_size: DEFAULT_PAGE_SIZE,
        page_delay: config.search_page_delay,
    };

    let app = build_app(AppState::new(
        job_store,
        Arc::new(search_service),
        aggregate_options,
    ));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received ctrl+c, shutting down");
}
