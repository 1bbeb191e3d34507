//! Process-wide monotone counters keyed by `(anomaly_type, severity)`.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::anomalies::{AnomalyType, Severity};
use crate::telemetry::classifier::Classification;
use crate::telemetry::registry;

/// The shared mutable state of the subsystem.
///
/// A dense grid of atomic cells, one per `(anomaly_type, severity)` pair, plus
/// two run totals. Counters only increase for the lifetime of the process.
/// Every increment is a single relaxed atomic add, so concurrent validation
/// runs never lose updates and no lock is ever held.
#[derive(Debug)]
pub struct TelemetryCounters {
    cells: [[AtomicU64; Severity::COUNT]; AnomalyType::COUNT],
    total_runs: AtomicU64,
    anomalous_runs: AtomicU64,
}

impl TelemetryCounters {
    pub fn new() -> Self {
        Self {
            cells: std::array::from_fn(|_| std::array::from_fn(|_| AtomicU64::new(0))),
            total_runs: AtomicU64::new(0),
            anomalous_runs: AtomicU64::new(0),
        }
    }

    /// Increment the cell for one classified record.
    pub fn record(&self, classification: Classification) {
        self.cells[classification.kind.index()][classification.severity.index()]
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_run(&self) {
        self.total_runs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_anomalous_run(&self) {
        self.anomalous_runs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self, kind: AnomalyType, severity: Severity) -> u64 {
        self.cells[kind.index()][severity.index()].load(Ordering::Relaxed)
    }

    pub fn total_runs(&self) -> u64 {
        self.total_runs.load(Ordering::Relaxed)
    }

    pub fn anomalous_runs(&self) -> u64 {
        self.anomalous_runs.load(Ordering::Relaxed)
    }

    /// Point-in-time copy of every nonzero cell, with exported metric names
    /// under `prefix`. Reads are per-cell atomic; a snapshot taken while
    /// aggregators run is a valid set of values each of which was current at
    /// its own read.
    pub fn snapshot(&self, prefix: &str) -> CounterSnapshot {
        let mut counters = Vec::new();
        for kind in AnomalyType::all() {
            for severity in Severity::all() {
                let count = self.get(kind, severity);
                if count > 0 {
                    counters.push(AnomalyCounter {
                        metric: registry::anomaly_metric_name(prefix, kind, severity),
                        kind,
                        severity,
                        count,
                    });
                }
            }
        }
        CounterSnapshot {
            runs_metric: registry::runs_metric_name(prefix),
            anomalous_runs_metric: registry::anomalous_runs_metric_name(prefix),
            total_runs: self.total_runs(),
            anomalous_runs: self.anomalous_runs(),
            counters,
        }
    }
}

impl Default for TelemetryCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// One exported `(anomaly_type, severity)` counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalyCounter {
    pub metric: String,
    pub kind: AnomalyType,
    pub severity: Severity,
    pub count: u64,
}

/// Everything a metrics backend collects in one pass. Zero cells are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSnapshot {
    pub runs_metric: String,
    pub anomalous_runs_metric: String,
    pub total_runs: u64,
    pub anomalous_runs: u64,
    pub counters: Vec<AnomalyCounter>,
}

impl CounterSnapshot {
    /// Sum of all `(anomaly_type, severity)` counts, i.e. the total number of
    /// anomaly records observed so far.
    pub fn total_records(&self) -> u64 {
        self.counters.iter().map(|c| c.count).sum()
    }
}
