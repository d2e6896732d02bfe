//! Route handlers.

use axum::{body::Bytes, extract::State, Json};

use crate::hashing::HashInput;
use crate::http::response::{ApiError, HealthStatus};
use crate::http::server::AppState;

/// Span name for hashing requests.
pub const HASH_SPAN_NAME: &str = "POST /hash";

/// `POST /hash`: SHA-256 of the trimmed body as lowercase hex.
pub async fn hash_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<String, ApiError> {
    let mut span = state.telemetry.start_request_span(HASH_SPAN_NAME);

    let input = match HashInput::parse(&body) {
        Ok(input) => input,
        Err(e) => {
            span.record_failure(&e);
            tracing::debug!(body_len = body.len(), error = %e, "Rejected hash request");
            return Err(e.into());
        }
    };

    let digest = input.digest();
    span.record_success(input.len(), &digest);

    tracing::debug!(
        input_length = input.len(),
        hash = %digest,
        "Computed digest"
    );

    Ok(digest.into_string())
}

/// `GET /health`: always healthy while the process is serving.
pub async fn health_handler() -> Json<HealthStatus> {
    Json(HealthStatus::healthy())
}
