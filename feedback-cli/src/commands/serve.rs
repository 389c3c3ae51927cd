//! HTTP server command for the feedback API

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use feedback_server::{run_server, AppState, FeedbackRepo};

use crate::config::{DatabaseOverrides, FeedbackConfig, ServerOverrides};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub server: ServerOverrides,

    #[command(flatten)]
    pub database: DatabaseOverrides,
}

/// Run the HTTP server until Ctrl+C or SIGTERM
pub async fn run_serve(args: ServeArgs, mut config: FeedbackConfig) -> Result<()> {
    args.server.apply(&mut config.server);
    args.database.apply(&mut config.database);

    let server_config = config.server.to_server_config()?;
    let options = config.database.connect_options()?;

    tracing::info!("Starting feedback API server");

    // Connection failures are fatal; nothing is retried
    let repo = FeedbackRepo::initialize(options)
        .await
        .context("Failed to initialize database")?;

    // Closes the connection once the server stops
    run_server(Arc::new(AppState::new(repo)), server_config)
        .await
        .context("Server error")?;

    Ok(())
}
