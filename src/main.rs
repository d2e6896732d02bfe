//! SHA-256 hashing service.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                 HASH SERVICE                  │
//!                      │                                              │
//!   POST /hash         │  ┌─────────┐   ┌──────────┐   ┌──────────┐   │
//!   ───────────────────┼─▶│  http   │──▶│ handlers │──▶│ hashing  │   │
//!                      │  │ server  │   │          │   │ (sha256) │   │
//!   GET /health        │  └─────────┘   └────┬─────┘   └──────────┘   │
//!   ───────────────────┼─▶     │             │ span                   │
//!                      │       │             ▼                        │
//!                      │       │      ┌─────────────┐  batch export   │
//!                      │       │      │  telemetry  │─────────────────┼──▶ Collector
//!                      │       │      └─────────────┘                 │
//!                      │  ┌────────────────────────────────────────┐  │
//!                      │  │ config · logging · metrics · lifecycle │  │
//!                      │  └────────────────────────────────────────┘  │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use hash_service::config::{resolve_config, ConfigOverrides};
use hash_service::lifecycle;
use hash_service::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "hash-service")]
#[command(about = "HTTP service returning SHA-256 digests", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, env = "HASH_SERVICE_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on.
    #[arg(long, env = "HASH_SERVICE_BIND_ADDRESS")]
    bind_address: Option<String>,

    /// Export request spans to the collector.
    #[arg(long, env = "HASH_SERVICE_TRACING_ENABLED")]
    tracing_enabled: Option<bool>,

    /// `service.name` attached to exported spans.
    #[arg(long, env = "HASH_SERVICE_SERVICE_NAME")]
    service_name: Option<String>,

    /// Trace collector URL.
    #[arg(long, env = "HASH_SERVICE_COLLECTOR_ENDPOINT")]
    collector_endpoint: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "HASH_SERVICE_LOG_LEVEL")]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            bind_address: self.bind_address.clone(),
            tracing_enabled: self.tracing_enabled,
            service_name: self.service_name.clone(),
            collector_endpoint: self.collector_endpoint.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref(), cli.overrides())?;

    init_logging(&config.observability);

    tracing::info!("hash-service v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        tracing_enabled = config.tracing.enabled,
        metrics_enabled = config.observability.metrics_enabled,
        max_body_bytes = config.limits.max_body_bytes,
        "Configuration loaded"
    );

    if let Err(e) = lifecycle::start(config).await {
        tracing::error!(error = %e, "Fatal error");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
