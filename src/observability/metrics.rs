//! Metrics collection and exposition.
//!
//! # Metrics
//! - `course_proxy_requests_total` (counter): requests by method, route, status
//! - `course_proxy_request_duration_seconds` (histogram): time to upstream headers
//!
//! Recording is always on; without an installed exporter the `metrics`
//! macros are no-ops.

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::Method;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one proxied request.
pub fn record_request(method: &Method, status: u16, route: &'static str, start: Instant) {
    ::metrics::counter!(
        "course_proxy_requests_total",
        "method" => method.to_string(),
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);

    ::metrics::histogram!("course_proxy_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}
