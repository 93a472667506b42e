//! Metrics registry for the blog server.
//!
//! Two latency histograms, both in microseconds:
//! - `blog_http_request_duration_micros{app,path,code,method}`
//! - `blog_storage_query_duration_micros{app,name}`
//!
//! Label sets are flattened into sorted `(key, value)` vectors so rendering
//! order is deterministic per series.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::storage::QueryMetrics;

/// Value of the `app` label on every series.
pub const APP_NAME: &str = "blog";

type LabelKey = Vec<(String, String)>;

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_str(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

// 100us, 500us, 1ms, 5ms, 10ms, 50ms, 100ms, 500ms, 1s
const BUCKETS_MICROS: [u64; 9] = [
    100, 500, 1_000, 5_000, 10_000, 50_000, 100_000, 500_000, 1_000_000,
];

#[derive(Default)]
struct AtomicHistogram {
    count: AtomicU64,
    sum: AtomicU64,
    buckets: [AtomicU64; BUCKETS_MICROS.len()],
}

#[derive(Default)]
pub struct HistogramVec {
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    /// Observe a duration into cumulative buckets.
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);
        let hist = self.map.entry(label_key(labels)).or_default();

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum.fetch_add(micros, Ordering::Relaxed);
        for (bucket, &le) in hist.buckets.iter().zip(BUCKETS_MICROS.iter()) {
            if micros <= le {
                bucket.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Number of observations recorded for an exact label set.
    pub fn count(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|h| h.count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} histogram", name);
        for r in self.map.iter() {
            let labels = label_str(r.key());
            let hist = r.value();
            let prefix = if labels.is_empty() {
                String::new()
            } else {
                format!("{},", labels)
            };

            for (bucket, le) in hist.buckets.iter().zip(BUCKETS_MICROS.iter()) {
                let n = bucket.load(Ordering::Relaxed);
                let _ = writeln!(out, "{}_bucket{{{}le=\"{}\"}} {}", name, prefix, le, n);
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, count);
            let sum = hist.sum.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_sum{{{}}} {}", name, labels, sum);
            let _ = writeln!(out, "{}_count{{{}}} {}", name, labels, count);
        }
    }
}

#[derive(Default)]
pub struct ServerMetrics {
    pub http_duration: HistogramVec,
    pub storage_query_duration: HistogramVec,
}

impl ServerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one handled HTTP request.
    pub fn observe_http_duration(&self, start: Instant, path: &str, code: u16, method: &str) {
        let code = code.to_string();
        self.http_duration.observe(
            &[("app", APP_NAME), ("path", path), ("code", &code), ("method", method)],
            start.elapsed(),
        );
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.http_duration
            .render("blog_http_request_duration_micros", &mut out);
        self.storage_query_duration
            .render("blog_storage_query_duration_micros", &mut out);
        out
    }
}

impl QueryMetrics for ServerMetrics {
    fn observe_query_duration(&self, start: Instant, name: &'static str) {
        self.storage_query_duration
            .observe(&[("app", APP_NAME), ("name", name)], start.elapsed());
    }
}
