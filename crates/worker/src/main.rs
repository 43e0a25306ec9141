use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod config;
mod request;

use cli::{Cli, Commands};
use config::WorkerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "courseware_worker=debug,courseware_duplication=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // --- Configuration ---
    let config = WorkerConfig::from_env()?;
    tracing::info!(
        max_connections = config.db_max_connections,
        run_migrations = config.run_migrations,
        "Loaded worker configuration"
    );

    // --- Database ---
    let pool = courseware_db::create_pool(&config.database_url, config.db_max_connections)
        .await
        .context("Failed to connect to database")?;
    courseware_db::health_check(&pool)
        .await
        .context("Database health check failed")?;

    if config.run_migrations {
        courseware_db::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
        tracing::info!("Database migrations applied");
    }

    match cli.command {
        Commands::Duplicate(args) => commands::duplicate(&pool, args).await,
        Commands::Leaderboard(args) => commands::leaderboard(&pool, args).await,
    }
}
