//! Minimal metrics registry for the admission engine.
//!
//! No external metrics crates; counters with dynamic labels are backed by
//! `DashMap`. Labels are flattened into sorted key vectors to keep
//! deterministic ordering in the rendered output.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let mut key: Vec<(String, String)> = labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        key.sort();

        let counter = self.map.entry(key).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Read a single labelled value (test/introspection helper).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        let mut key: Vec<(String, String)> = labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        key.sort();
        self.map
            .get(&key)
            .map(|c| c.value().load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        for r in self.map.iter() {
            let key = r.key();
            let val = r.value().load(Ordering::Relaxed);
            let label_str = key
                .iter()
                .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                .collect::<Vec<_>>()
                .join(",");
            let _ = writeln!(out, "{}{{{}}} {}", name, label_str, val);
        }
    }
}

/// Counters for every decision path the engine owns.
#[derive(Default)]
pub struct GateMetrics {
    pub admissions_total: CounterVec,
    pub authz_decisions_total: CounterVec,
    pub fail_open_total: CounterVec,
    pub provision_failures_total: CounterVec,
    pub lifecycle_events_total: CounterVec,
}

impl GateMetrics {
    /// Render all registered metrics.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.admissions_total.render("botgate_admissions_total", &mut out);
        self.authz_decisions_total
            .render("botgate_authz_decisions_total", &mut out);
        self.fail_open_total.render("botgate_fail_open_total", &mut out);
        self.provision_failures_total
            .render("botgate_provision_failures_total", &mut out);
        self.lifecycle_events_total
            .render("botgate_lifecycle_events_total", &mut out);
        out
    }
}
