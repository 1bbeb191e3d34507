//! The single mutator of the telemetry counters.

use std::sync::Arc;

use crate::anomalies::{Anomalies, AnomalyType};
use crate::telemetry::classifier;
use crate::telemetry::counters::TelemetryCounters;

/// Consumes one `Anomalies` result per validation run and updates the shared
/// counters. Clone one per worker; all clones share the same counters.
///
/// The caller contract is exactly one [`update_telemetry`] call per run.
/// The call is synchronous, non-blocking, infallible, and safe to make from
/// any number of parallel runs.
///
/// [`update_telemetry`]: TelemetryAggregator::update_telemetry
#[derive(Debug, Clone)]
pub struct TelemetryAggregator {
    counters: Arc<TelemetryCounters>,
}

impl TelemetryAggregator {
    pub fn new(counters: Arc<TelemetryCounters>) -> Self {
        Self { counters }
    }

    /// Record telemetry for one completed validation run.
    ///
    /// Increments `total_runs` unconditionally, `anomalous_runs` once iff the
    /// result carries at least one record, and one `(type, severity)` cell per
    /// feature-level and dataset-level record. Never fails: records that
    /// cannot be interpreted count under the Unknown bucket.
    pub fn update_telemetry(&self, result: &Anomalies) {
        // 1. Every run counts, clean or not.
        self.counters.record_run();

        if result.is_clean() {
            tracing::debug!("validation run recorded: clean");
            return;
        }
        self.counters.record_anomalous_run();

        // 2. Classify and count every record at both levels.
        let mut degraded = 0u64;
        for info in result
            .feature_anomalies
            .values()
            .chain(result.dataset_anomalies.iter())
        {
            let classification = classifier::classify(info);
            if classification.kind == AnomalyType::Unknown {
                degraded += 1;
            }
            self.counters.record(classification);
        }

        if degraded > 0 {
            tracing::warn!(degraded, "anomaly records had no classifiable kind");
        }
        tracing::debug!(
            features = result.feature_anomalies.len(),
            dataset = result.dataset_anomalies.len(),
            "validation run recorded: anomalous"
        );
    }
}
