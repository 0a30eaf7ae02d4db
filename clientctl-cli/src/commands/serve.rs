//! HTTP server command
//!
//! Bootstraps storage, then serves the client API until Ctrl+C/SIGTERM.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use clientctl_server::db::ClientRepo;
use clientctl_server::http::server::DEFAULT_PORT;
use clientctl_server::{run_server, ServerConfig};

use super::{prepare_storage, DatabaseArgs};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Interface to bind to
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    // Storage must be ready before the listener exists.
    let pool = prepare_storage(&args.database).await?;

    let config = ServerConfig {
        bind_addr: SocketAddr::new(args.host, args.port),
    };
    tracing::info!("Starting clientctl server on {}", config.bind_addr);

    run_server(Arc::new(ClientRepo::new(pool)), config)
        .await
        .context("Server error")?;

    Ok(())
}
