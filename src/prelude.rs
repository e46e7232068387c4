pub use crate::builder::CacheBuilder;
pub use crate::error::{ConfigError, InvariantError};
pub use crate::outcome::{Outcome, RecencyRole};
pub use crate::policy::lru::LruCache;
pub use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

#[cfg(feature = "metrics")]
pub use crate::metrics::{LruMetricsSnapshot, PrometheusTextExporter};
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsExporter, MetricsSnapshotProvider};
