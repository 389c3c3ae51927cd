//! Schema bootstrap command
//!
//! Creates the feedback table if it does not exist, then exits.

use anyhow::{Context, Result};
use clap::Parser;

use feedback_server::{FeedbackRepo, FeedbackStore};

use crate::config::{DatabaseOverrides, FeedbackConfig};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub database: DatabaseOverrides,
}

pub async fn run_migrate(args: MigrateArgs, mut config: FeedbackConfig) -> Result<()> {
    args.database.apply(&mut config.database);
    let options = config.database.connect_options()?;

    let repo = FeedbackRepo::initialize(options)
        .await
        .context("Failed to initialize database")?;
    repo.close().await;

    Ok(())
}
