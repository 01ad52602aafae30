//! Apply schema migrations without starting the server

use anyhow::{Context, Result};
use clap::Parser;

use userctl_server::db::run_migrations;

use super::DatabaseArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = args.database.connect().await?;

    let result = run_migrations(&pool)
        .await
        .context("Failed to apply migrations");
    pool.close().await;

    result
}
