use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Importance of a detected anomaly.
///
/// `Unknown` covers results from engines that never set a severity; telemetry
/// must still count those records rather than reject them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Severity {
    #[default]
    Unknown,
    Warning,
    Error,
}

impl Severity {
    pub const COUNT: usize = 3;

    /// Stable index into the counter grid.
    pub fn index(self) -> usize {
        match self {
            Severity::Unknown => 0,
            Severity::Warning => 1,
            Severity::Error => 2,
        }
    }

    /// Rank for tie-breaking: Error outranks Warning outranks Unknown.
    pub fn rank(self) -> u8 {
        match self {
            Severity::Unknown => 0,
            Severity::Warning => 1,
            Severity::Error => 2,
        }
    }

    /// Short lowercase label used as a metric dimension.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Unknown => "unknown",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    pub fn all() -> [Severity; Severity::COUNT] {
        [Severity::Unknown, Severity::Warning, Severity::Error]
    }
}

/// Coarse kind of a detected anomaly, used as a metric dimension.
///
/// Structural kinds describe a mismatch against the schema itself; statistical
/// kinds describe a mismatch against baseline statistics. The split matters for
/// classification tie-breaks (structural ranks above statistical).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AnomalyType {
    /// A column required by the schema was absent from the data.
    SchemaMissingColumn,
    /// The data contained a column the schema does not know about.
    SchemaNewColumn,
    /// A feature's value type disagreed with the schema.
    TypeMismatch,
    /// Values fell outside the schema's declared domain.
    DomainMismatch,
    /// Too large a fraction of a feature's values were missing.
    MissingData,
    /// A feature's value distribution drifted from the baseline statistics.
    DistributionSkew,
    /// The engine reported a record this subsystem cannot interpret.
    #[default]
    Unknown,
}

impl AnomalyType {
    pub const COUNT: usize = 7;

    /// Stable index into the counter grid.
    pub fn index(self) -> usize {
        match self {
            AnomalyType::SchemaMissingColumn => 0,
            AnomalyType::SchemaNewColumn => 1,
            AnomalyType::TypeMismatch => 2,
            AnomalyType::DomainMismatch => 3,
            AnomalyType::MissingData => 4,
            AnomalyType::DistributionSkew => 5,
            AnomalyType::Unknown => 6,
        }
    }

    /// Tie-break priority among reasons of equal severity. Lower wins.
    /// Structural kinds come before statistical kinds; Unknown is last.
    pub fn priority(self) -> u8 {
        match self {
            AnomalyType::SchemaMissingColumn => 0,
            AnomalyType::SchemaNewColumn => 1,
            AnomalyType::TypeMismatch => 2,
            AnomalyType::DomainMismatch => 3,
            AnomalyType::MissingData => 4,
            AnomalyType::DistributionSkew => 5,
            AnomalyType::Unknown => 6,
        }
    }

    /// Short snake_case label used as a metric dimension.
    pub fn label(self) -> &'static str {
        match self {
            AnomalyType::SchemaMissingColumn => "schema_missing_column",
            AnomalyType::SchemaNewColumn => "schema_new_column",
            AnomalyType::TypeMismatch => "type_mismatch",
            AnomalyType::DomainMismatch => "domain_mismatch",
            AnomalyType::MissingData => "missing_data",
            AnomalyType::DistributionSkew => "distribution_skew",
            AnomalyType::Unknown => "unknown",
        }
    }

    pub fn all() -> [AnomalyType; AnomalyType::COUNT] {
        [
            AnomalyType::SchemaMissingColumn,
            AnomalyType::SchemaNewColumn,
            AnomalyType::TypeMismatch,
            AnomalyType::DomainMismatch,
            AnomalyType::MissingData,
            AnomalyType::DistributionSkew,
            AnomalyType::Unknown,
        ]
    }
}

/// One structured cause inside an anomaly record. A record may carry several
/// (e.g. a feature that is both mistyped and drifting).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReason {
    pub kind: AnomalyType,
    pub severity: Severity,
    pub description: String,
}

/// One detected problem, for a single feature or for the dataset as a whole.
/// Immutable once constructed by the validation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnomalyInfo {
    /// Record-level severity as reported by the engine. May be Unknown.
    pub severity: Severity,
    pub short_description: String,
    /// Structured sub-causes. May be empty for engines that only report
    /// free-text findings.
    pub reasons: Vec<AnomalyReason>,
}

impl AnomalyInfo {
    pub fn new(severity: Severity, short_description: impl Into<String>) -> Self {
        Self {
            severity,
            short_description: short_description.into(),
            reasons: Vec::new(),
        }
    }

    pub fn with_reason(mut self, kind: AnomalyType, severity: Severity) -> Self {
        self.reasons.push(AnomalyReason {
            kind,
            severity,
            description: String::new(),
        });
        self
    }
}

/// Identifies the schema/statistics version a run was compared against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BaselineMetadata {
    pub schema_version: String,
    pub statistics_version: String,
}

/// The full result of one validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Anomalies {
    /// Per-feature findings, keyed by feature identifier (unique within a run).
    pub feature_anomalies: BTreeMap<String, AnomalyInfo>,
    /// Findings about the dataset as a whole, in engine-reported order.
    pub dataset_anomalies: Vec<AnomalyInfo>,
    pub baseline: Option<BaselineMetadata>,
}

impl Anomalies {
    /// True when the run found nothing at either level.
    pub fn is_clean(&self) -> bool {
        self.feature_anomalies.is_empty() && self.dataset_anomalies.is_empty()
    }

    /// Total number of anomaly records across both levels.
    pub fn record_count(&self) -> usize {
        self.feature_anomalies.len() + self.dataset_anomalies.len()
    }
}
