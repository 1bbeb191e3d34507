use thiserror::Error;

/// Errors from the export path. Recording itself is infallible; only flushing
/// to an external sink can fail, and that failure stays with whoever drives
/// the flush, never with the validation pipeline.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to encode counter snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write to metrics sink: {0}")]
    Sink(#[from] std::io::Error),

    #[error("metrics backend rejected export: {0}")]
    Backend(String),
}
