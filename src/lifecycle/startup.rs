//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize telemetry and metrics from validated configuration
//! - Bind the listener and serve until a shutdown signal
//! - Drain within the grace period, then flush queued spans

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::wait_for_signal;
use crate::observability::metrics::init_metrics;
use crate::observability::{Telemetry, TelemetryError};

/// Fatal errors during startup or serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to initialize tracing: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("failed to initialize metrics: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),

    #[error("server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Run the service with `config` until SIGINT or SIGTERM.
pub async fn start(config: ServiceConfig) -> Result<(), StartupError> {
    let telemetry = Telemetry::init(&config.tracing)?;

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
        init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let result = serve(config, telemetry.clone(), listener, wait_for_signal()).await;

    // Provider shutdown blocks until the exporter thread has flushed.
    if let Err(e) = tokio::task::spawn_blocking(move || telemetry.shutdown()).await {
        tracing::warn!(error = %e, "Telemetry flush task failed");
    }

    result
}

/// Serve on `listener` until `signal` resolves, then drain.
pub async fn serve<F>(
    config: ServiceConfig,
    telemetry: Telemetry,
    listener: TcpListener,
    signal: F,
) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send,
{
    let grace = Duration::from_secs(config.timeouts.shutdown_grace_secs);
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, telemetry);
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        result = &mut server_task => {
            result??;
            return Ok(());
        }
        _ = signal => {}
    }

    shutdown.trigger();

    match tokio::time::timeout(grace, &mut server_task).await {
        Ok(result) => result??,
        Err(_) => {
            tracing::warn!(
                grace_secs = grace.as_secs(),
                "Shutdown grace period elapsed, closing remaining connections"
            );
            server_task.abort();
        }
    }

    Ok(())
}
