//! Lightweight in-process metrics (dependency-free).
//!
//! Histograms are stored as atomics keyed by label sets and rendered in
//! Prometheus text format by the monitoring `/metrics` handler.

pub mod metrics;

pub use metrics::{HistogramVec, ServerMetrics, APP_NAME};
