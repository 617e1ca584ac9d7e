//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): requests by route, status
//! - `relay_request_duration_seconds` (histogram): latency by route
//! - `relay_upstream_calls_total` (counter): upstream calls by API, outcome
//! - `relay_upstream_duration_seconds` (histogram): upstream latency by API
//! - `relay_avatar_fallbacks_total` (counter): legacy thumbnail fallbacks
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a completed relay request.
pub fn record_request(route: &str, status: u16, start: Instant) {
    let route = route.to_string();
    ::metrics::counter!(
        "relay_requests_total",
        "route" => route.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("relay_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record one upstream API call.
pub fn record_upstream_call(upstream: &'static str, outcome: &'static str, start: Instant) {
    ::metrics::counter!(
        "relay_upstream_calls_total",
        "upstream" => upstream,
        "outcome" => outcome
    )
    .increment(1);
    ::metrics::histogram!("relay_upstream_duration_seconds", "upstream" => upstream)
        .record(start.elapsed().as_secs_f64());
}

/// Record a fallback to the legacy thumbnail URL.
pub fn record_avatar_fallback() {
    ::metrics::counter!("relay_avatar_fallbacks_total").increment(1);
}

/// Route-level middleware recording request count and latency.
pub async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    record_request(&route, response.status().as_u16(), start);
    response
}
