mod noop_metrics;

pub use noop_metrics::NoopMetrics;
use std::sync::Arc;

/// Creates the metrics backend used when `PASTEBOOK_METRICS_TYPE` is unset
/// or `noop`: every call is ignored and `/metrics` renders an empty body.
pub fn create() -> anyhow::Result<crate::domain::MetricsPtr> {
    Ok(Arc::new(NoopMetrics::new()))
}
