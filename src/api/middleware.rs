/// Request middleware
use crate::metrics;
use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Record count and latency of every request
pub async fn record_http_metrics(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = metric_path(req.uri().path());
    let start = Instant::now();

    let response = next.run(req).await;

    metrics::record_http_request(
        &method,
        path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );

    response
}

/// Collapse request paths onto known routes to keep label cardinality bounded
fn metric_path(path: &str) -> &'static str {
    match path {
        "/health" => "/health",
        "/health/live" => "/health/live",
        "/metrics" => "/metrics",
        "/api/resolve/author" => "/api/resolve/author",
        "/api/resolve/entry" => "/api/resolve/entry",
        "/api/identifiers/validate" => "/api/identifiers/validate",
        "/api/identifiers/extract" => "/api/identifiers/extract",
        "/api/hosts" => "/api/hosts",
        _ => "other",
    }
}
