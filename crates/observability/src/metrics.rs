//! Prometheus metrics
//!
//! The exporter serves `/metrics` on its own port; [`ServerMetrics`] records
//! per-route request counts and latencies for the HTTP API.

use metrics::{counter, gauge, histogram, Gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

/// Start the Prometheus exporter on `0.0.0.0:port`.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    PrometheusBuilder::new().with_http_listener(addr).install()?;

    tracing::info!(%addr, "Metrics server listening");
    Ok(())
}

/// Request metrics for one server.
///
/// # Metrics
///
/// * `http_requests_total{server, route, status}`
/// * `http_request_duration_seconds{server, route}`
/// * `http_requests_in_flight{server}`
#[derive(Clone)]
pub struct ServerMetrics {
    in_flight: Gauge,
    server_name: String,
}

impl ServerMetrics {
    pub fn new(server_name: &str) -> Self {
        let name = server_name.to_string();
        Self {
            in_flight: gauge!("http_requests_in_flight", "server" => name.clone()),
            server_name: name,
        }
    }

    /// Record a completed request against its matched route template
    /// (e.g. `/api/v1.0/:start`) so that dates do not explode label cardinality.
    pub fn record_request(&self, route: &str, status_code: u16, duration: Duration) {
        counter!(
            "http_requests_total",
            "server" => self.server_name.clone(),
            "route" => route.to_string(),
            "status" => status_code.to_string()
        )
        .increment(1);
        histogram!(
            "http_request_duration_seconds",
            "server" => self.server_name.clone(),
            "route" => route.to_string()
        )
        .record(duration.as_secs_f64());
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }
}

/// Tracks one request; records it on drop.
///
/// ```ignore
/// let mut guard = RequestMetricsGuard::new(&metrics, "/api/v1.0/stations");
/// let response = next.run(request).await;
/// guard.set_status(response.status().as_u16());
/// ```
pub struct RequestMetricsGuard<'a> {
    metrics: &'a ServerMetrics,
    route: String,
    start: Instant,
    status_code: u16,
}

impl<'a> RequestMetricsGuard<'a> {
    pub fn new(metrics: &'a ServerMetrics, route: impl Into<String>) -> Self {
        metrics.in_flight.increment(1.0);
        Self {
            metrics,
            route: route.into(),
            start: Instant::now(),
            // Dropped before a status is known means the handler was cancelled
            status_code: 499,
        }
    }

    pub fn set_status(&mut self, code: u16) {
        self.status_code = code;
    }
}

impl Drop for RequestMetricsGuard<'_> {
    fn drop(&mut self) {
        self.metrics.in_flight.decrement(1.0);
        self.metrics
            .record_request(&self.route, self.status_code, self.start.elapsed());
    }
}
