//! Data model for the result of one validation run.
//!
//! # OWNERSHIP INVARIANT
//! Everything in this module is produced by the external validation engine and
//! is READ-ONLY inside this crate. Telemetry never mutates a result, and no
//! counter value ever feeds back into validation decisions.

pub mod types;

pub use types::{Anomalies, AnomalyInfo, AnomalyReason, AnomalyType, BaselineMetadata, Severity};
