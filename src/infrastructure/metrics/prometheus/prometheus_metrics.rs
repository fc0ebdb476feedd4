//! Prometheus metrics implementation.
//!
//! This module provides a concrete implementation of the `Metrics` trait using
//! the Prometheus metrics format. It delegates to utility functions in sibling
//! modules (`counters.rs`, `recorder.rs`) which handle the actual metrics
//! collection via the global `metrics` crate registry.

use crate::domain::Metrics;
use std::time::Instant;

/// Prometheus-based metrics implementation.
///
/// Empty because metrics are registered globally through the `counter!()` and
/// `histogram!()` macros; the handle in `recorder.rs` renders them.
pub struct PrometheusMetrics {
    // Empty - uses global metrics registry pattern
}

impl PrometheusMetrics {
    pub fn new() -> Self {
        tracing::info!("Creating Prometheus metrics");
        PrometheusMetrics {}
    }
}

impl Metrics for PrometheusMetrics {
    fn render(&self) -> String {
        super::render_metrics()
    }

    fn record_paste_created(&self) {
        tracing::debug!("Recording paste created event");
        super::increment_paste_created();
    }

    fn record_bookmark_saved(&self) {
        tracing::debug!("Recording bookmark saved event");
        super::increment_bookmark_saved();
    }

    fn record_http_request(&self, start: Instant, _path: &str, method: &str, status: u16) {
        super::track_http_request(start, method, status);
    }
}
