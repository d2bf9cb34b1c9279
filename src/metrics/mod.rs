pub mod middleware;
pub mod registry;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use prometheus::{Encoder, TextEncoder};

/// Handler for the /metrics endpoint
/// Returns metrics in Prometheus exposition format
pub async fn metrics_handler() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {}", e),
        )
            .into_response();
    }

    let body = String::from_utf8(buffer).unwrap_or_default();
    (
        StatusCode::OK,
        [("Content-Type", encoder.format_type())],
        body,
    )
        .into_response()
}

pub use registry::{
    init_metrics, HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION_SECONDS, STRUCTURED_ERRORS_TOTAL,
};
