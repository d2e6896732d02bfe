//! Distributed tracing support.
//!
//! # Responsibilities
//! - Build the span export pipeline once at startup
//! - Open one span per hashing request and tag it with the outcome
//! - Flush queued spans on shutdown
//!
//! # Design Decisions
//! - `Telemetry` is an explicit value carried in application state; the
//!   provider is never installed as the OpenTelemetry global
//! - Export goes through a batch processor with a bounded queue running on
//!   its own thread: a full queue drops spans, a dead collector only logs
//! - When disabled the provider has no processors, so spans are created
//!   and discarded without leaving the process

use std::time::Duration;

use opentelemetry::trace::{Span as _, SpanKind, Status, Tracer as _, TracerProvider as _};
use opentelemetry::KeyValue;
use opentelemetry_otlp::{Protocol, WithExportConfig};
use opentelemetry_sdk::trace::{
    BatchConfigBuilder, BatchSpanProcessor, SdkTracer, SdkTracerProvider,
};
use opentelemetry_sdk::Resource;
use thiserror::Error;
use url::Url;

use crate::config::TracingConfig;
use crate::hashing::{HexDigest, ValidationError};

/// Span attribute holding the trimmed input length in bytes.
pub const INPUT_LENGTH_ATTRIBUTE: &str = "input_length";
/// Span attribute holding the hex digest.
pub const HASH_ATTRIBUTE: &str = "hash";
/// Span attribute set on validation failure.
pub const ERROR_ATTRIBUTE: &str = "error";

const INSTRUMENTATION_SCOPE: &str = env!("CARGO_PKG_NAME");

/// Path of Jaeger's Thrift-over-HTTP receiver, which does not accept OTLP.
const JAEGER_THRIFT_PATH: &str = "/api/traces";

/// True when `endpoint` points at a Jaeger Thrift receiver.
pub fn is_jaeger_thrift_endpoint(endpoint: &str) -> bool {
    Url::parse(endpoint)
        .map(|url| url.path().trim_end_matches('/') == JAEGER_THRIFT_PATH)
        .unwrap_or(false)
}

/// Errors raised while building the export pipeline.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to build span exporter: {0}")]
    Exporter(#[from] opentelemetry_otlp::ExporterBuildError),

    #[error("span exporter construction panicked")]
    ExporterThread,
}

/// Handle used by request handlers to open spans.
///
/// Cloning is cheap; all clones share one provider.
#[derive(Clone)]
pub struct Telemetry {
    provider: SdkTracerProvider,
    tracer: SdkTracer,
}

impl Telemetry {
    /// Build the export pipeline described by `config`.
    pub fn init(config: &TracingConfig) -> Result<Self, TelemetryError> {
        if !config.enabled {
            tracing::info!("Trace export disabled");
            return Ok(Self::disabled());
        }

        if is_jaeger_thrift_endpoint(&config.collector_endpoint) {
            tracing::warn!(
                collector_endpoint = %config.collector_endpoint,
                "Collector endpoint is a Jaeger Thrift receiver; spans are sent as OTLP \
                 and will be rejected (use the OTLP receiver, e.g. :4318/v1/traces)"
            );
        }

        // The blocking HTTP client cannot be constructed on a runtime thread.
        let endpoint = config.collector_endpoint.clone();
        let timeout = Duration::from_secs(config.export_timeout_secs);
        let exporter = std::thread::spawn(move || {
            opentelemetry_otlp::SpanExporter::builder()
                .with_http()
                .with_protocol(Protocol::HttpBinary)
                .with_endpoint(endpoint)
                .with_timeout(timeout)
                .build()
        })
        .join()
        .map_err(|_| TelemetryError::ExporterThread)??;

        let batch_config = BatchConfigBuilder::default()
            .with_max_queue_size(config.max_queue_size)
            .with_max_export_batch_size(config.max_export_batch_size)
            .with_scheduled_delay(Duration::from_millis(config.scheduled_delay_ms))
            .build();

        let processor = BatchSpanProcessor::builder(exporter)
            .with_batch_config(batch_config)
            .build();

        let resource = Resource::builder()
            .with_service_name(config.service_name.clone())
            .build();

        let provider = SdkTracerProvider::builder()
            .with_span_processor(processor)
            .with_resource(resource)
            .build();

        tracing::info!(
            service_name = %config.service_name,
            collector_endpoint = %config.collector_endpoint,
            max_queue_size = config.max_queue_size,
            "Trace export enabled"
        );

        Ok(Self::from_provider(provider))
    }

    /// A handle whose spans go nowhere.
    pub fn disabled() -> Self {
        Self::from_provider(SdkTracerProvider::builder().build())
    }

    /// Wrap a provider built elsewhere.
    pub fn from_provider(provider: SdkTracerProvider) -> Self {
        let tracer = provider.tracer(INSTRUMENTATION_SCOPE);
        Self { provider, tracer }
    }

    /// Open a server span for one request. The span ends when the guard drops.
    pub fn start_request_span(&self, name: &'static str) -> RequestSpan {
        let span = self
            .tracer
            .span_builder(name)
            .with_kind(SpanKind::Server)
            .start(&self.tracer);

        RequestSpan { span }
    }

    /// Flush queued spans and stop the exporter.
    pub fn shutdown(&self) {
        if let Err(e) = self.provider.shutdown() {
            tracing::warn!(error = %e, "Tracer provider shutdown failed");
        }
    }
}

/// Scoped guard over a request span.
pub struct RequestSpan {
    span: <SdkTracer as opentelemetry::trace::Tracer>::Span,
}

impl RequestSpan {
    /// Tag the span with a successful digest.
    pub fn record_success(&mut self, input_length: usize, digest: &HexDigest) {
        let input_length = i64::try_from(input_length).unwrap_or(i64::MAX);
        self.span
            .set_attribute(KeyValue::new(INPUT_LENGTH_ATTRIBUTE, input_length));
        self.span
            .set_attribute(KeyValue::new(HASH_ATTRIBUTE, digest.to_string()));
    }

    /// Tag the span as failed validation.
    pub fn record_failure(&mut self, error: &ValidationError) {
        self.span.set_attribute(KeyValue::new(ERROR_ATTRIBUTE, true));
        self.span.set_status(Status::error(error.to_string()));
    }
}
