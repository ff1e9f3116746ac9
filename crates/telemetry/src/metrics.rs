//! In-process metrics for the capture pipeline and query surface.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A monotonically increasing counter.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Latency histogram with fixed millisecond buckets.
#[derive(Debug)]
pub struct Histogram {
    /// One slot per finite bound, plus a trailing overflow bucket.
    buckets: [AtomicU64; 9],
    sum: AtomicU64,
    count: AtomicU64,
}

impl Histogram {
    /// Bucket upper bounds in ms. Renders routinely take seconds, so the
    /// range skews much higher than a typical request-latency histogram.
    const BUCKET_BOUNDS: [u64; 8] = [50, 250, 1000, 5000, 15000, 30000, 60000, 120000];

    pub fn new() -> Self {
        Self {
            buckets: Default::default(),
            sum: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    /// Record a value in milliseconds. Values beyond the last finite bound
    /// land in the overflow bucket rather than inflating it.
    pub fn observe(&self, ms: u64) {
        self.sum.fetch_add(ms, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);

        let idx = Self::BUCKET_BOUNDS
            .iter()
            .position(|&bound| ms <= bound)
            .unwrap_or(Self::BUCKET_BOUNDS.len());
        self.buckets[idx].fetch_add(1, Ordering::Relaxed);
    }

    /// Observations above the last finite bound.
    pub fn overflow_count(&self) -> u64 {
        self.buckets[Self::BUCKET_BOUNDS.len()].load(Ordering::Relaxed)
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn mean(&self) -> f64 {
        let count = self.count();
        if count == 0 {
            0.0
        } else {
            self.sum.load(Ordering::Relaxed) as f64 / count as f64
        }
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

/// Collected metrics for the link monitor.
#[derive(Debug, Default)]
pub struct Metrics {
    // Capture pipeline
    pub snapshots_created: Counter,
    pub snapshot_failures: Counter,
    pub render_calls: Counter,
    pub render_failures: Counter,
    pub artifacts_written: Counter,
    pub artifact_write_errors: Counter,
    pub audit_inserts: Counter,
    pub audit_insert_errors: Counter,

    // Query surface
    pub query_requests: Counter,
    pub query_failures: Counter,

    // Latency
    pub snapshot_latency_ms: Histogram,
    pub render_latency_ms: Histogram,
}

/// A snapshot of metrics at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub snapshots_created: u64,
    pub snapshot_failures: u64,
    pub render_calls: u64,
    pub render_failures: u64,
    pub artifacts_written: u64,
    pub artifact_write_errors: u64,
    pub audit_inserts: u64,
    pub audit_insert_errors: u64,
    pub query_requests: u64,
    pub query_failures: u64,
    pub snapshot_latency_mean_ms: f64,
    pub render_latency_mean_ms: f64,
}

impl Metrics {
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: Utc::now(),
            snapshots_created: self.snapshots_created.get(),
            snapshot_failures: self.snapshot_failures.get(),
            render_calls: self.render_calls.get(),
            render_failures: self.render_failures.get(),
            artifacts_written: self.artifacts_written.get(),
            artifact_write_errors: self.artifact_write_errors.get(),
            audit_inserts: self.audit_inserts.get(),
            audit_insert_errors: self.audit_insert_errors.get(),
            query_requests: self.query_requests.get(),
            query_failures: self.query_failures.get(),
            snapshot_latency_mean_ms: self.snapshot_latency_ms.mean(),
            render_latency_mean_ms: self.render_latency_ms.mean(),
        }
    }
}

/// Global metrics registry.
pub static METRICS: std::sync::LazyLock<Metrics> = std::sync::LazyLock::new(Metrics::default);

/// Get the global metrics instance.
pub fn metrics() -> &'static Metrics {
    &METRICS
}
