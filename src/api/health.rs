/// Health check and metrics endpoints
use crate::{context::AppContext, error::LinkError, metrics};
use axum::{extract::State, http::header, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

/// Health status response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: f64,
    /// Host that references are compared against
    pub backend_host: String,
    pub checked_at: String,
}

/// Build health check routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/health", get(health_basic))
        .route("/health/live", get(liveness_probe))
        .route("/metrics", get(metrics_endpoint))
}

/// Basic health check
pub async fn health_basic(State(ctx): State<AppContext>) -> Json<HealthStatus> {
    let uptime = ctx.uptime_seconds();
    metrics::set_uptime(uptime);

    Json(HealthStatus {
        status: "ok".to_string(),
        version: ctx.config.service.version.clone(),
        uptime_seconds: uptime,
        backend_host: ctx.resolver.backend_host().to_string(),
        checked_at: chrono::Utc::now().to_rfc3339(),
    })
}

/// Liveness probe
///
/// If we can respond, we're alive.
pub async fn liveness_probe() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Prometheus scrape endpoint
pub async fn metrics_endpoint(
    State(ctx): State<AppContext>,
) -> Result<impl IntoResponse, LinkError> {
    if !ctx.config.metrics.enabled {
        return Err(LinkError::NotFound("Metrics are disabled".to_string()));
    }

    metrics::set_uptime(ctx.uptime_seconds());
    let body = metrics::render_metrics()?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    ))
}
