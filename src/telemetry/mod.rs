//! Telemetry aggregation over validation results.
//!
//! # SAFETY INVARIANT
//! Telemetry is a write-only side-effect layer for the validation pipeline.
//! Counter values must **NEVER** be read inside validation logic; they exist
//! solely so an operator or dashboard can observe validation health.
//!
//! # FAILURE INVARIANT
//! Recording must **NEVER** fail the caller. Records that cannot be
//! interpreted degrade to the Unknown bucket; only the flush path (external
//! sink IO) has an error type.

pub mod aggregator;
pub mod classifier;
pub mod counters;
pub mod registry;

use std::sync::Arc;

use crate::error::TelemetryError;
use aggregator::TelemetryAggregator;
use counters::{CounterSnapshot, TelemetryCounters};
use registry::MetricsSink;

/// Naming knobs for exported metrics.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Prefix for every exported metric name.
    pub metric_prefix: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            metric_prefix: "datavigil".to_string(),
        }
    }
}

/// Process-wide telemetry state with an explicit lifecycle:
/// zeroed at startup via [`Telemetry::init`], shared by reference with every
/// validation run, flushed once at shutdown via [`Telemetry::flush`].
///
/// Constructed explicitly rather than held in a global so tests can run
/// isolated instances.
#[derive(Debug)]
pub struct Telemetry {
    config: TelemetryConfig,
    counters: Arc<TelemetryCounters>,
}

impl Telemetry {
    /// Zeroed counters. Call once at process start.
    pub fn init(config: TelemetryConfig) -> Self {
        Self {
            config,
            counters: Arc::new(TelemetryCounters::new()),
        }
    }

    /// An aggregator sharing this instance's counters. Cheap to clone per
    /// validation worker.
    pub fn aggregator(&self) -> TelemetryAggregator {
        TelemetryAggregator::new(Arc::clone(&self.counters))
    }

    /// Point-in-time view of all counters. Safe to call concurrently with
    /// running aggregators; each cell is read atomically.
    pub fn snapshot(&self) -> CounterSnapshot {
        self.counters.snapshot(&self.config.metric_prefix)
    }

    /// Export current counter values to the deployment's metrics backend.
    /// Call at shutdown (and optionally on a collector's schedule).
    pub fn flush(&self, sink: &mut dyn MetricsSink) -> Result<(), TelemetryError> {
        let snapshot = self.snapshot();
        sink.export(&snapshot)?;
        tracing::info!(
            runs = snapshot.total_runs,
            anomalous_runs = snapshot.anomalous_runs,
            counters = snapshot.counters.len(),
            "telemetry flushed"
        );
        Ok(())
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::init(TelemetryConfig::default())
    }
}
