//! clientctl - client records HTTP service
//!
//! - `serve`: create the database/table if needed and run the HTTP API
//! - `init-db`: only create the database/table
//!
//! Settings come from flags, the environment, or a `.env` file in the
//! working directory.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "clientctl",
    author,
    version,
    about = "CRUD HTTP service for client records backed by PostgreSQL"
)]
struct Cli {
    /// Enable debug logging (ignored when RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize storage and run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the database and clients table, then exit
    InitDb(commands::init_db::InitDbArgs),
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::InitDb(args) => commands::run_init_db(args).await?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is normal
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(err) = tracing_setup::init(&TracingConfig { debug: cli.debug }) {
        eprintln!("failed to initialize tracing: {err}");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_flags_parse() {
        let cli = Cli::try_parse_from([
            "clientctl",
            "--debug",
            "serve",
            "--port",
            "8080",
            "--host",
            "127.0.0.1",
            "--database-url",
            "postgres://u:p@db:5432/crm",
            "--max-connections",
            "4",
        ])
        .expect("valid arguments");

        assert!(cli.debug);
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.port, 8080);
        assert_eq!(args.host.to_string(), "127.0.0.1");
        assert_eq!(args.database.database_url, "postgres://u:p@db:5432/crm");
        assert_eq!(args.database.max_connections, 4);
    }

    #[test]
    fn rejects_non_numeric_port() {
        assert!(Cli::try_parse_from(["clientctl", "serve", "--port", "http"]).is_err());
    }
}
