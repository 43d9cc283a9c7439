//! Metrics for the ingestion loop.
//!
//! Recording goes through the `metrics` facade and is a no-op until
//! [`init`] installs the Prometheus recorder.

use std::fmt;
use std::sync::OnceLock;
use tracing::info;

/// Enum representing all metric names used in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    PagesFetched,
    NodesAdded,
    FetchErrors,
    ShapeErrors,
    RunsCompleted,
    RequestDuration,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::PagesFetched => "microcms_pages_fetched_total",
            MetricName::NodesAdded => "microcms_nodes_added_total",
            MetricName::FetchErrors => "microcms_fetch_errors_total",
            MetricName::ShapeErrors => "microcms_shape_errors_total",
            MetricName::RunsCompleted => "microcms_runs_completed_total",
            MetricName::RequestDuration => "microcms_request_duration_seconds",
        }
    }

    pub fn all_metrics() -> impl Iterator<Item = MetricName> {
        use MetricName::*;
        [PagesFetched, NodesAdded, FetchErrors, ShapeErrors, RunsCompleted, RequestDuration].into_iter()
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static METRICS_HANDLE: OnceLock<metrics_exporter_prometheus::PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Calling it twice is an error.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {}", e))?;
    METRICS_HANDLE
        .set(handle)
        .map_err(|_| "Metrics recorder already initialized")?;
    info!("Metrics system initialized");
    Ok(())
}

/// Prometheus text exposition of everything recorded so far
pub fn render() -> Option<String> {
    METRICS_HANDLE.get().map(|handle| handle.render())
}

pub mod ingest {
    use super::MetricName;

    pub fn page_fetched(type_name: &str) {
        ::metrics::counter!(MetricName::PagesFetched.as_str(), "type_name" => type_name.to_string()).increment(1);
    }

    pub fn nodes_added(type_name: &str, count: usize) {
        ::metrics::counter!(MetricName::NodesAdded.as_str(), "type_name" => type_name.to_string())
            .increment(count as u64);
    }

    pub fn fetch_error(status: u16) {
        ::metrics::counter!(MetricName::FetchErrors.as_str(), "status" => status.to_string()).increment(1);
    }

    pub fn shape_error() {
        ::metrics::counter!(MetricName::ShapeErrors.as_str()).increment(1);
    }

    pub fn run_completed(type_name: &str) {
        ::metrics::counter!(MetricName::RunsCompleted.as_str(), "type_name" => type_name.to_string()).increment(1);
    }

    pub fn request_duration(secs: f64) {
        ::metrics::histogram!(MetricName::RequestDuration.as_str()).record(secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_metric_names_are_unique_and_prefixed() {
        let names: HashSet<_> = MetricName::all_metrics().map(|m| m.as_str()).collect();
        assert_eq!(names.len(), MetricName::all_metrics().count());
        assert!(names.iter().all(|n| n.starts_with("microcms_")));
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        ingest::page_fetched("microcmsArticles");
        ingest::nodes_added("microcmsArticles", 3);
        ingest::request_duration(0.25);
    }
}
