//! Pure classification of a single anomaly record into metric dimensions.

use crate::anomalies::{AnomalyInfo, AnomalyType, Severity};

/// The metric dimensions derived from one anomaly record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: AnomalyType,
    pub severity: Severity,
}

impl Classification {
    pub const UNKNOWN: Classification = Classification {
        kind: AnomalyType::Unknown,
        severity: Severity::Unknown,
    };
}

/// Derive `(anomaly_type, severity)` for a record.
///
/// Total over all inputs: a record with no structured reasons and no severity
/// classifies as `(Unknown, Unknown)` instead of erroring. Deterministic: the
/// same record always yields the same classification.
///
/// When a record carries several reasons, the highest-severity reason wins;
/// among reasons of equal severity the fixed [`AnomalyType::priority`] ordering
/// decides (structural above statistical), so repeated runs on identical input
/// produce identical counts.
pub fn classify(info: &AnomalyInfo) -> Classification {
    let dominant = info.reasons.iter().min_by_key(|reason| {
        // min_by_key with inverted severity rank: strongest severity first,
        // then priority order. min_by_key keeps the first on ties, preserving
        // engine-reported order as the final tie-break.
        (u8::MAX - reason.severity.rank(), reason.kind.priority())
    });

    match dominant {
        Some(reason) => Classification {
            kind: reason.kind,
            // The record-level severity never lowers a reason's severity, and
            // a record marked Error counts as Error even if its strongest
            // reason only says Warning.
            severity: max_severity(reason.severity, info.severity),
        },
        None => Classification {
            kind: AnomalyType::Unknown,
            severity: info.severity,
        },
    }
}

fn max_severity(a: Severity, b: Severity) -> Severity {
    if b.rank() > a.rank() {
        b
    } else {
        a
    }
}
