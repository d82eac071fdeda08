//! Lightweight in-process metrics (dependency-free).
//!
//! Counters are stored as atomics behind `DashMap` label maps and rendered in
//! Prometheus text exposition format by whatever surface the host pipeline
//! exposes. The engine itself owns no endpoint.

pub mod metrics;

pub use metrics::GateMetrics;
