//! Storage bootstrap without serving

use anyhow::Result;
use clap::Parser;

use super::{prepare_storage, DatabaseArgs};

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Create the database and `clients` table, then exit.
pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let pool = prepare_storage(&args.database).await?;
    pool.close().await;
    Ok(())
}
