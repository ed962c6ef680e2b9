// Main entry point for the job match API server

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Duration;
use server_core::domains::auth::JwtService;
use server_core::kernel::{start_scheduler, InMemoryConnectionRegistry, NotificationService, ServerDeps};
use server_core::{server::build_app, Config};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Job Match API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // One registry per process, shared by the notifier and the SSE endpoint
    let connections = Arc::new(InMemoryConnectionRegistry::new());
    let notifier = Arc::new(NotificationService::new(pool.clone(), connections.clone()));
    let jwt_service = Arc::new(JwtService::new(&config.jwt_secret, config.jwt_issuer.clone()));

    let deps = ServerDeps::new(
        pool,
        notifier,
        connections,
        jwt_service,
        Duration::hours(config.match_expiry_hours),
    );

    // Keep the scheduler handle alive for the life of the server
    let _scheduler = start_scheduler(deps.clone(), &config.expiry_sweep_cron)
        .await
        .context("Failed to start scheduled tasks")?;

    let app = build_app(deps, &config).context("Failed to build application")?;

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
