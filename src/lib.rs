pub mod anomalies;
pub mod error;
pub mod telemetry;

// Re-export the surface most callers need: build a result, hand it to an
// aggregator, flush at shutdown.
pub use anomalies::{Anomalies, AnomalyInfo, AnomalyType, Severity};
pub use error::TelemetryError;
pub use telemetry::aggregator::TelemetryAggregator;
pub use telemetry::{Telemetry, TelemetryConfig};
