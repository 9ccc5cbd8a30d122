use anyhow::Result;
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;

pub fn describe() {
    describe_counter!(
        "polyscope_analyses_total",
        "Number of analyses served (API and CLI)."
    );
    describe_counter!(
        "polyscope_live_data_hits_total",
        "Analyses built from live trade data."
    );
    describe_counter!(
        "polyscope_synthetic_fallbacks_total",
        "Analyses that fell back to the synthetic generator."
    );
    describe_histogram!(
        "polyscope_analysis_latency_ms",
        "End-to-end analyze latency in milliseconds."
    );
    describe_counter!(
        "tracing_error_events",
        "ERROR-level tracing events emitted by the process."
    );
}

pub fn install_prometheus(port: u16) -> Result<PrometheusHandle> {
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    Ok(PrometheusBuilder::new()
        .with_http_listener(addr)
        .install_recorder()?)
}

pub fn record_analysis(latency_ms: f64) {
    metrics::counter!("polyscope_analyses_total").increment(1);
    metrics::histogram!("polyscope_analysis_latency_ms").record(latency_ms);
}
