//! Optional operation counters for [`LruCache`](crate::policy::lru::LruCache).
//!
//! Compiled only with the `metrics` feature. Recording happens inline in the
//! cache's hot paths; reading goes through
//! [`MetricsSnapshotProvider`](traits::MetricsSnapshotProvider) and publishing
//! through [`MetricsExporter`](traits::MetricsExporter).

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::LruMetrics;
pub use snapshot::LruMetricsSnapshot;
