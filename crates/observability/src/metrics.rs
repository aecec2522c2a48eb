//! Prometheus exporter bootstrap

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Install the global Prometheus recorder and serve `/metrics` on `port`
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(port: u16) -> anyhow::Result<SocketAddr> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    tracing::info!(%addr, "Metrics exporter listening");
    Ok(addr)
}
