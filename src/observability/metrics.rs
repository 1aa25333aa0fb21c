//! Metrics collection and exposition.
//!
//! # Metrics
//! - `fileops_requests_total` (counter): requests by method, route, status
//! - `fileops_request_duration_seconds` (histogram): latency by method, route
//! - `fileops_generated_bytes_total` (counter): filler bytes written

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus exporter on `addr`. Needs a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let method = method.to_string();
    let route = route.to_string();

    metrics::counter!(
        "fileops_requests_total",
        "method" => method.clone(),
        "route" => route.clone(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "fileops_request_duration_seconds",
        "method" => method,
        "route" => route
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_generated_bytes(bytes: u64) {
    metrics::counter!("fileops_generated_bytes_total").increment(bytes);
}
