//! Tazapay MCP server entry point.
//!
//! Loads configuration (environment plus optional `.env`), sets up logging on
//! stderr and serves the tools on the configured transport.

use anyhow::{Context, Result};
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use tazapay_mcp_server::core::config::LoggingConfig;
use tazapay_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    init_logging(&config.logging);

    info!("Starting {} v{}", config.server.name, config.server.version);
    debug!(tazapay = ?config.tazapay, transport = ?config.transport, "Loaded configuration");

    let server = match McpServer::new(config.clone()) {
        Ok(server) => server,
        Err(e) => {
            error!("Cannot start: {e}");
            return Err(e).context("failed to initialize server");
        }
    };

    TransportService::new(config.transport)
        .run(server)
        .await
        .context("transport stopped with an error")?;

    info!("Server shutting down");
    Ok(())
}

/// Install the stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise `MCP_LOG_LEVEL` (info by default)
/// applies to every target.
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.to_lowercase()));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if logging.with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
