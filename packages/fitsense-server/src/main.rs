mod bootstrap;
mod db;
mod error;
mod llm;
mod routes;
mod services;
mod state;
#[cfg(test)]
mod test_support;

use crate::llm::GroqClient;
use crate::services::generation::WorkoutGenerator;
use crate::state::AppState;
use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use sea_orm::{Database, DatabaseConnection};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_LOG_FILTER: &str = "fitsense_server=info,tower_http=info";

#[derive(Parser)]
#[command(name = "fitsense-server", version, about = "FitSense workout generation server")]
struct CliArgs {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Load a free-exercise-db `exercises/` directory into the catalog
    SeedExercises {
        /// Directory holding one JSON file per exercise
        dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    dotenv().ok();
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let rt = tokio::runtime::Runtime::new()?;
    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => rt.block_on(fitsense_service())?,
        Command::SeedExercises { dir } => rt.block_on(seed_service(dir))?,
    }

    Ok(())
}

async fn connect_db() -> anyhow::Result<DatabaseConnection> {
    let db_url = bootstrap::config::database_url_from_env();
    let db_cnn = Database::connect(&db_url)
        .await
        .with_context(|| format!("failed to connect to {db_url}"))?;
    db::initialize::initial(&db_cnn)
        .await
        .context("failed to run migrations")?;
    Ok(db_cnn)
}

async fn fitsense_service() -> anyhow::Result<()> {
    let config = bootstrap::config::app_config_from_env()?;
    let db_cnn = connect_db().await?;
    let client = GroqClient::new(&config.llm).context("failed to build LLM client")?;

    let state = Arc::new(AppState {
        db: db_cnn.clone(),
        generator: WorkoutGenerator::new(Arc::new(client)),
    });
    let app = bootstrap::app::axum_app(state);

    info!(addr = %config.addr, model = %config.llm.model, "fitsense started");
    let tcp_listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(tcp_listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db_cnn.close().await.context("failed to close database")?;
    info!("fitsense stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
    info!("shutdown requested");
}

async fn seed_service(dir: PathBuf) -> anyhow::Result<()> {
    let db_cnn = connect_db().await?;
    let report = services::seed::seed_exercises(&db_cnn, &dir)
        .await
        .map_err(|e| anyhow::anyhow!("seeding failed: {e}"))?;
    println!(
        "seeded {} exercises ({} already present, {} unreadable)",
        report.inserted, report.skipped, report.failed
    );
    db_cnn.close().await.context("failed to close database")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default() {
        let args = CliArgs::try_parse_from(["fitsense-server"]).unwrap();
        assert!(args.command.is_none());
    }

    #[test]
    fn seed_takes_directory() {
        let args =
            CliArgs::try_parse_from(["fitsense-server", "seed-exercises", "/data/exercises"])
                .unwrap();
        match args.command {
            Some(Command::SeedExercises { dir }) => assert_eq!(dir, PathBuf::from("/data/exercises")),
            _ => panic!("expected seed-exercises"),
        }
    }

    #[test]
    fn seed_requires_directory() {
        assert!(CliArgs::try_parse_from(["fitsense-server", "seed-exercises"]).is_err());
    }
}
