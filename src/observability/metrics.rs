//! Metrics collection and exposition.
//!
//! # Metrics
//! - `landing_locale_redirects_total` (counter): root requests sent to the localized page
//! - `landing_signups_total` (counter): signup outcomes by `outcome`
//! - `landing_store_request_duration_seconds` (histogram): store latency by `op`
//!
//! Recording is a no-op until a recorder is installed, so tests and
//! metrics-disabled deployments pay nothing.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics recorder"),
    }
}

/// Record a locale redirect.
pub fn record_redirect() {
    counter!("landing_locale_redirects_total").increment(1);
}

/// Record a signup outcome (`succeeded`, `duplicate`, `failed`, `skipped`, `in_flight`).
pub fn record_signup(outcome: &'static str) {
    counter!("landing_signups_total", "outcome" => outcome).increment(1);
}

/// Record the duration of one store call.
pub fn record_store_call(op: &'static str, start: Instant) {
    histogram!("landing_store_request_duration_seconds", "op" => op)
        .record(start.elapsed().as_secs_f64());
}
