use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jobly_api::database::{DatabaseManager, JobRepository};
use jobly_api::state::AppState;
use jobly_api::{config, is_production};

#[derive(Parser)]
#[command(name = "jobly-api")]
#[command(about = "Jobly jobs API server")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Port to listen on (defaults to JOBLY_API_PORT, PORT, then 3001)")]
    port: Option<u16>,

    #[arg(long, help = "Do not apply database migrations at startup")]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jobly_api=debug,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = config::config();
    tracing::info!("Starting Jobly API in {:?} mode", config.environment);
    if is_production!() && config.security.jwt_secret.is_empty() {
        tracing::warn!("JWT_SECRET is not set; admin routes will reject every request");
    }

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    if config.database.run_migrations && !cli.skip_migrations {
        DatabaseManager::migrate(&pool).await.context("failed to run migrations")?;
    }

    let state = AppState::new(Arc::new(JobRepository::new(pool)));
    let app = jobly_api::app(state);

    // Allow tests or deployments to override port via env
    let port = cli
        .port
        .or_else(|| std::env::var("JOBLY_API_PORT").ok().and_then(|s| s.parse().ok()))
        .or_else(|| std::env::var("PORT").ok().and_then(|s| s.parse().ok()))
        .unwrap_or(3001);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Jobly API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
