//! feedback - launcher for the feedback API
//!
//! Loads configuration (.env, TOML file, environment, flags), sets up
//! tracing and runs one of:
//! - `serve`: the HTTP API
//! - `migrate`: create the feedback table and exit

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use commands::migrate::{run_migrate, MigrateArgs};
use commands::serve::{run_serve, ServeArgs};
use config::FeedbackConfig;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "feedback",
    author,
    version,
    about = "Feedback submission API backed by PostgreSQL"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true, env = "FEEDBACK_DEBUG")]
    debug: bool,

    /// Path to a TOML config file [default: ./feedback.toml if present]
    #[arg(long, short = 'c', global = true, env = "FEEDBACK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(ServeArgs),

    /// Create the feedback table if it does not exist
    Migrate(MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing so clap's env fallbacks see .env values
    let env_files = config::load_dotenv();
    let cli = Cli::parse();

    let config = FeedbackConfig::load(cli.config.as_deref())?;

    tracing_setup::init(&TracingConfig {
        debug: cli.debug || config.server.debug,
    })?;

    if env_files.is_empty() {
        tracing::debug!("No .env files found");
    } else {
        for path in &env_files {
            tracing::info!("Loaded environment from {}", path.display());
        }
    }

    match cli.command {
        Commands::Serve(args) => run_serve(args, config).await,
        Commands::Migrate(args) => run_migrate(args, config).await,
    }
}
