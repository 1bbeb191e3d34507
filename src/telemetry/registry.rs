//! Metric naming and the export seam toward the deployment's metrics backend.
//!
//! The core only guarantees counters exist under stable names; the transport
//! (scrape, push, agent socket) belongs to whatever [`MetricsSink`] the host
//! process installs.

use std::io::Write;

use crate::anomalies::{AnomalyType, Severity};
use crate::error::TelemetryError;
use crate::telemetry::counters::CounterSnapshot;

/// Name of the per-`(type, severity)` counter. Stable across calls.
pub fn anomaly_metric_name(prefix: &str, kind: AnomalyType, severity: Severity) -> String {
    format!("{prefix}.anomaly_count.{}.{}", kind.label(), severity.label())
}

pub fn runs_metric_name(prefix: &str) -> String {
    format!("{prefix}.runs_total")
}

pub fn anomalous_runs_metric_name(prefix: &str) -> String {
    format!("{prefix}.anomalous_runs_total")
}

/// Where counter values go at flush time. Implemented by the deployment
/// environment; this crate ships only a JSON-lines sink.
pub trait MetricsSink {
    fn export(&mut self, snapshot: &CounterSnapshot) -> Result<(), TelemetryError>;
}

/// Writes one JSON object per flush to any `Write`, for environments that
/// collect counters from a log stream or a file.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MetricsSink for JsonLinesSink<W> {
    fn export(&mut self, snapshot: &CounterSnapshot) -> Result<(), TelemetryError> {
        let line = serde_json::to_string(snapshot)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
