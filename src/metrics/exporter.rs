use std::io::Write;
use std::sync::{Mutex, MutexGuard};

use crate::metrics::snapshot::LruMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for cache metrics snapshots.
///
/// Writes the text exposition format so the output can be scraped by
/// Prometheus or forwarded to an OpenTelemetry collector. Write errors are
/// dropped; metrics never fail the caller.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock(&self) -> MutexGuard<'_, W> {
        self.writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = self.lock();
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", suffix, value);
    }

    fn gauge(&self, suffix: &str, value: usize) {
        self.write_metric("gauge", suffix, value as u64);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<LruMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &LruMetricsSnapshot) {
        self.counter("get_calls_total", snapshot.get_calls);
        self.counter("get_hits_total", snapshot.get_hits);
        self.counter("get_misses_total", snapshot.get_misses);
        self.counter("insert_calls_total", snapshot.insert_calls);
        self.counter("insert_updates_total", snapshot.insert_updates);
        self.counter("insert_new_total", snapshot.insert_new);
        self.counter("evicted_entries_total", snapshot.evicted_entries);
        self.counter("clears_total", snapshot.clears);
        self.counter("pop_lru_calls_total", snapshot.pop_lru_calls);
        self.counter("pop_lru_found_total", snapshot.pop_lru_found);
        self.counter("touch_calls_total", snapshot.touch_calls);
        self.counter("touch_found_total", snapshot.touch_found);
        self.counter("remove_calls_total", snapshot.remove_calls);
        self.counter("remove_found_total", snapshot.remove_found);
        self.counter("peek_lru_calls_total", snapshot.peek_lru_calls);
        self.counter("peek_lru_found_total", snapshot.peek_lru_found);
        self.counter("recency_rank_calls_total", snapshot.recency_rank_calls);
        self.counter("recency_rank_found_total", snapshot.recency_rank_found);
        self.counter(
            "recency_rank_scan_steps_total",
            snapshot.recency_rank_scan_steps,
        );
        self.gauge("cache_len", snapshot.cache_len);
        self.gauge("capacity", snapshot.capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(prefix: &str, snapshot: &LruMetricsSnapshot) -> String {
        let exporter = PrometheusTextExporter::new(prefix, Vec::new());
        exporter.export(snapshot);
        String::from_utf8(exporter.into_inner()).unwrap()
    }

    #[test]
    fn writes_prefixed_counters_and_gauges() {
        let snapshot = LruMetricsSnapshot {
            get_hits: 7,
            cache_len: 3,
            capacity: 4,
            ..Default::default()
        };
        let text = render("lru", &snapshot);

        assert!(text.contains("# TYPE lru_get_hits_total counter\nlru_get_hits_total 7\n"));
        assert!(text.contains("# TYPE lru_cache_len gauge\nlru_cache_len 3\n"));
        assert!(text.contains("lru_capacity 4\n"));
    }

    #[test]
    fn empty_prefix_uses_bare_names() {
        let text = render("", &LruMetricsSnapshot::default());
        assert!(text.contains("\nget_calls_total 0\n"));
        assert!(!text.contains("_get_calls_total"));
    }
}
