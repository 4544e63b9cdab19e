//! Metrics collection for slack-notifier.
//!
//! A Prometheus recorder backs the `metrics` macros used here and in the
//! shared HTTP middleware.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder. Later calls are no-ops.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
        }
        Err(e) => tracing::warn!("Failed to install Prometheus recorder: {}", e),
    }
}

/// Get metrics output in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Record one send attempt. `outcome` is `sent`, `failed` or `error`.
pub fn record_slack_message(provider: &'static str, outcome: &'static str) {
    metrics::counter!(
        "slack_messages_total",
        "provider" => provider,
        "outcome" => outcome
    )
    .increment(1);
}
