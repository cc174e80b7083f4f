/// Metrics and telemetry for Locus Links
///
/// Provides Prometheus-compatible metrics for monitoring:
/// - HTTP request counts and latencies
/// - Locality classifications by entity kind
/// - Identifier and host extraction fallbacks

use crate::error::{LinkError, LinkResult};
use lazy_static::lazy_static;
use prometheus::{
    register_gauge, register_histogram_vec, register_int_counter_vec, Encoder, Gauge,
    HistogramVec, IntCounterVec, TextEncoder,
};

lazy_static! {
    // ========== HTTP Metrics ==========

    /// Total HTTP requests by method, path, and status
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .unwrap();

    /// HTTP request duration in seconds
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request latencies in seconds",
        &["method", "path"],
        vec![0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .unwrap();

    // ========== Resolution Metrics ==========

    /// Locality classifications by entity kind and outcome
    pub static ref LOCALITY_CLASSIFICATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "locality_classifications_total",
        "Total number of locality classifications",
        &["kind", "locality"]
    )
    .unwrap();

    /// Identifier extractions that fell back to a guess
    pub static ref IDENTIFIER_FALLBACKS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "identifier_fallbacks_total",
        "Total number of identifier extractions that fell back to the last segment",
        &["operation"]
    )
    .unwrap();

    /// Host extractions that degraded to an empty host
    pub static ref HOST_EXTRACTION_FAILURES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "host_extraction_failures_total",
        "Total number of URLs whose host could not be extracted",
        &["reason"]
    )
    .unwrap();

    // ========== System Metrics ==========

    /// Application uptime in seconds
    pub static ref UPTIME_SECONDS: Gauge = register_gauge!(
        "uptime_seconds",
        "Application uptime in seconds"
    )
    .unwrap();
}

/// Render metrics in Prometheus text format
pub fn render_metrics() -> LinkResult<String> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| LinkError::Internal(format!("Failed to encode metrics: {}", e)))?;
    String::from_utf8(buffer)
        .map_err(|e| LinkError::Internal(format!("Metrics are not valid UTF-8: {}", e)))
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration);
}

/// Record a locality classification
pub fn record_classification(kind: &str, locality: &str) {
    LOCALITY_CLASSIFICATIONS_TOTAL
        .with_label_values(&[kind, locality])
        .inc();
}

/// Record an identifier extraction that had to guess
pub fn record_identifier_fallback(operation: &str) {
    IDENTIFIER_FALLBACKS_TOTAL
        .with_label_values(&[operation])
        .inc();
}

/// Record a URL whose host could not be extracted
pub fn record_host_extraction_failure(reason: &str) {
    HOST_EXTRACTION_FAILURES_TOTAL
        .with_label_values(&[reason])
        .inc();
}

/// Update the uptime gauge
pub fn set_uptime(seconds: f64) {
    UPTIME_SECONDS.set(seconds);
}
