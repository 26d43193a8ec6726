//! vvault landing service
//!
//! Serves the prebuilt landing pages and the two pieces of server-side logic
//! behind them.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │               LANDING SERVICE                │
//!     Client Request     │  ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//!     ───────────────────┼─▶│request id│──▶│  trace   │──▶│  locale  │──┼──▶ 307 /fr
//!                        │  └──────────┘   └──────────┘   └────┬─────┘  │
//!                        │                                     │        │
//!                        │            ┌────────────────────────┼──────┐ │
//!                        │            ▼                        ▼      ▼ │
//!                        │     ┌────────────┐        ┌─────────┐ ┌─────┐│
//!                        │     │ newsletter │        │ pricing │ │pages││
//!                        │     └─────┬──────┘        └─────────┘ └─────┘│
//!                        └───────────┼──────────────────────────────────┘
//!                                    ▼
//!                          PostgREST `beta_waitlist`
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use vvault_landing::config::{load_config, LandingConfig};
use vvault_landing::observability::{logging, metrics};
use vvault_landing::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "vvault-landing")]
#[command(about = "Landing site service: locale redirect, newsletter signup, pricing", long_about = None)]
struct Cli {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => {
            let mut config = LandingConfig::default();
            vvault_landing::config::loader::resolve_secrets(&mut config);
            config
        }
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "vvault-landing starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        store = %config.store.base_url,
        table = %config.store.table,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
