//! Prometheus metrics for the command-line tool.
//!
//! Registers the engine metrics from `discovery_core` alongside a command
//! counter, and renders them in the Prometheus text format.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// Commands run, by command and status.
pub static COMMANDS_RUN: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("mydia_cli_commands_total", "Total CLI commands run"),
        &["command", "status"], // status: "success", "error"
    )
    .unwrap()
});

fn register_metrics(registry: &Registry) {
    registry.register(Box::new(COMMANDS_RUN.clone())).unwrap();

    // Core metrics (definitions, classification, scoring)
    for metric in discovery_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .context("Failed to encode metrics")?;
    String::from_utf8(buffer).context("Metrics output is not UTF-8")
}
