//! Prometheus metrics: exporter startup and per-endpoint request metrics.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use jurisai_common::{JurisError, Result};
use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Instant;
use tracing::{info, warn};

pub const REQUEST_COUNT: &str = "request_count";
pub const REQUEST_LATENCY: &str = "request_latency_seconds";

/// Install the Prometheus recorder and its HTTP listener.
///
/// Must run inside the server's Tokio runtime.
pub fn init_metrics(host: &str, port: u16) -> Result<()> {
    let ip: IpAddr = host.parse().unwrap_or_else(|_| {
        warn!("Metrics host '{}' is not an IP address, binding 0.0.0.0", host);
        IpAddr::V4(Ipv4Addr::UNSPECIFIED)
    });
    let addr = SocketAddr::new(ip, port);

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| JurisError::config(format!("Failed to start metrics exporter: {}", e)))?;

    describe_counter!(REQUEST_COUNT, "Total API requests");
    describe_histogram!(REQUEST_LATENCY, Unit::Seconds, "Request latency");

    info!("Prometheus metrics exposed on http://{}/metrics", addr);
    Ok(())
}

/// Middleware recording request count and latency per endpoint.
///
/// Without an installed recorder the macros are no-ops.
pub async fn track_requests(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> std::result::Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    // Route pattern keeps label cardinality bounded
    let endpoint = req
        .match_pattern()
        .unwrap_or_else(|| "unmatched".to_string());

    counter!(REQUEST_COUNT, "endpoint" => endpoint.clone()).increment(1);
    let start = Instant::now();

    let response = next.call(req).await;

    histogram!(REQUEST_LATENCY, "endpoint" => endpoint).record(start.elapsed().as_secs_f64());
    response
}
