//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and middleware produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!     → telemetry.rs (per-request spans exported to a collector)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//!     → Distributed tracing backend (OTLP over HTTP, optional)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON or pretty) for machine parsing
//! - Span export is batched on a background thread, never awaited by handlers
//! - The telemetry client is passed through application state, not registered globally

pub mod logging;
pub mod metrics;
pub mod telemetry;

pub use telemetry::{RequestSpan, Telemetry, TelemetryError};
