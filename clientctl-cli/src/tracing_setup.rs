//! Tracing setup for the clientctl binary
//!
//! Usage:
//!   clientctl serve                        # info-level logs
//!   clientctl --debug serve                # debug logs, with targets
//!   RUST_LOG=clientctl_server=debug ...    # fine-grained control
//!
//! `RUST_LOG` always wins over `--debug` when it is set.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (used when RUST_LOG is not set)
    pub debug: bool,
}

impl TracingConfig {
    /// Filter used when `RUST_LOG` is absent.
    fn default_directives(&self) -> &'static str {
        if self.debug {
            "debug,hyper=info,h2=info"
        } else {
            "info,tower_http=info,sqlx=warn"
        }
    }
}

/// Initialize console tracing. Fails if a global subscriber is already set.
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directives()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
