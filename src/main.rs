use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use match_api::config::AppConfig;
use match_api::database::{DatabaseManager, PgMatchRepository};
use match_api::{app, AppState};

#[derive(Parser)]
#[command(name = "match-api")]
#[command(about = "HTTP API for football matches backed by PostgreSQL")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Bind host (overrides APP_HOST)")]
    host: Option<String>,

    #[arg(long, help = "Bind port (overrides APP_PORT / PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Do not create the matches table on startup")]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DB_* variables
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("match_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.skip_migrations {
        config.database.run_migrations = false;
    }

    let database = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to the database")?;
    database
        .health_check()
        .await
        .context("database is not reachable")?;
    tracing::info!("Connected to the database");

    if config.database.run_migrations {
        database
            .run_migrations()
            .await
            .context("failed to apply migrations")?;
    }

    let state = AppState::new(Arc::new(PgMatchRepository::new(database.pool().clone())));

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Match API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}
