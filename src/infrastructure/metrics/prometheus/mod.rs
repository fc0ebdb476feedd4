mod counters;
mod prometheus_metrics;
mod recorder;

pub use prometheus_metrics::PrometheusMetrics;
use std::sync::Arc;

// Re-export utilities for internal use within this module
pub(crate) use counters::{increment_bookmark_saved, increment_paste_created, track_http_request};
pub(crate) use recorder::{init_metrics, render_metrics};

/// Creates a new Prometheus metrics implementation.
///
/// This implementation collects metrics in Prometheus format, exposed
/// through the `/metrics` endpoint for scraping.
///
/// Returns a fully initialized metrics instance ready for use.
pub fn create() -> anyhow::Result<crate::domain::MetricsPtr> {
    tracing::info!("Initializing Prometheus metrics");
    init_metrics()?;

    Ok(Arc::new(PrometheusMetrics::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_create_returns_valid_metrics() {
        let result = create();
        assert!(result.is_ok());
    }

    #[test]
    fn test_create_twice_reuses_recorder() {
        assert!(create().is_ok());
        assert!(create().is_ok());
    }

    #[test]
    fn test_recorded_counters_are_rendered() {
        let metrics = create().unwrap();
        metrics.record_paste_created();
        metrics.record_bookmark_saved();
        metrics.record_http_request(Instant::now(), "/", "POST", 200);

        let text = metrics.render();
        assert!(text.contains("pastes_created_total"));
        assert!(text.contains("bookmark_versions_total"));
    }
}
