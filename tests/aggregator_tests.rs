use datavigil::anomalies::{Anomalies, AnomalyInfo, AnomalyType, Severity};
use datavigil::{Telemetry, TelemetryConfig};

fn anomaly(kind: AnomalyType, severity: Severity) -> AnomalyInfo {
    AnomalyInfo::new(severity, "test anomaly").with_reason(kind, severity)
}

// Opt into log output with RUST_LOG=debug. Safe to call from every test.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[test]
fn test_clean_run_counts_run_only() {
    init_tracing();
    let telemetry = Telemetry::default();
    let agg = telemetry.aggregator();

    // 1. A run that found nothing.
    agg.update_telemetry(&Anomalies::default());

    // 2. Only total_runs moves.
    let snap = telemetry.snapshot();
    assert_eq!(snap.total_runs, 1);
    assert_eq!(snap.anomalous_runs, 0, "clean run must not count as anomalous");
    assert_eq!(snap.total_records(), 0);
}

#[test]
fn test_single_feature_anomaly() {
    let telemetry = Telemetry::default();
    let agg = telemetry.aggregator();

    let mut result = Anomalies::default();
    result.feature_anomalies.insert(
        "age".to_string(),
        anomaly(AnomalyType::TypeMismatch, Severity::Error),
    );

    agg.update_telemetry(&result);

    let snap = telemetry.snapshot();
    assert_eq!(snap.total_runs, 1);
    assert_eq!(snap.anomalous_runs, 1);
    assert_eq!(snap.counters.len(), 1);
    assert_eq!(snap.counters[0].kind, AnomalyType::TypeMismatch);
    assert_eq!(snap.counters[0].severity, Severity::Error);
    assert_eq!(snap.counters[0].count, 1);
}

#[test]
fn test_anomalous_run_counted_once_regardless_of_record_count() {
    let telemetry = Telemetry::default();
    let agg = telemetry.aggregator();

    let mut result = Anomalies::default();
    for i in 0..5 {
        result.feature_anomalies.insert(
            format!("feature_{i}"),
            anomaly(AnomalyType::MissingData, Severity::Warning),
        );
    }
    result
        .dataset_anomalies
        .push(anomaly(AnomalyType::DistributionSkew, Severity::Error));

    agg.update_telemetry(&result);

    let snap = telemetry.snapshot();
    assert_eq!(snap.total_runs, 1);
    assert_eq!(snap.anomalous_runs, 1, "many records, still one anomalous run");
}

#[test]
fn test_increment_sum_equals_record_count() {
    let telemetry = Telemetry::default();
    let agg = telemetry.aggregator();

    // 3 feature-level + 2 dataset-level records, mixed kinds.
    let mut result = Anomalies::default();
    result.feature_anomalies.insert(
        "a".into(),
        anomaly(AnomalyType::SchemaMissingColumn, Severity::Error),
    );
    result.feature_anomalies.insert(
        "b".into(),
        anomaly(AnomalyType::TypeMismatch, Severity::Warning),
    );
    result
        .feature_anomalies
        .insert("c".into(), AnomalyInfo::default());
    result
        .dataset_anomalies
        .push(anomaly(AnomalyType::DistributionSkew, Severity::Warning));
    result
        .dataset_anomalies
        .push(anomaly(AnomalyType::DistributionSkew, Severity::Warning));

    agg.update_telemetry(&result);

    let snap = telemetry.snapshot();
    assert_eq!(
        snap.total_records(),
        result.record_count() as u64,
        "every record increments exactly one cell"
    );
}

#[test]
fn test_unclassifiable_record_counts_under_unknown() {
    init_tracing();
    let telemetry = Telemetry::default();
    let agg = telemetry.aggregator();

    let mut result = Anomalies::default();
    result
        .feature_anomalies
        .insert("mystery".into(), AnomalyInfo::default());

    // Must not panic or error.
    agg.update_telemetry(&result);

    let snap = telemetry.snapshot();
    assert_eq!(snap.counters.len(), 1);
    assert_eq!(snap.counters[0].kind, AnomalyType::Unknown);
    assert_eq!(snap.counters[0].severity, Severity::Unknown);
    assert_eq!(snap.counters[0].count, 1);
}

#[test]
fn test_counters_accumulate_across_runs() {
    let telemetry = Telemetry::default();
    let agg = telemetry.aggregator();

    let mut result = Anomalies::default();
    result.feature_anomalies.insert(
        "f".into(),
        anomaly(AnomalyType::DomainMismatch, Severity::Warning),
    );

    // 1. Three anomalous runs, then one clean run.
    for _ in 0..3 {
        agg.update_telemetry(&result);
    }
    agg.update_telemetry(&Anomalies::default());

    // 2. Counters are monotone, never reset between runs.
    let snap = telemetry.snapshot();
    assert_eq!(snap.total_runs, 4);
    assert_eq!(snap.anomalous_runs, 3);
    assert_eq!(snap.counters[0].count, 3);
}

#[test]
fn test_input_is_not_mutated() {
    let telemetry = Telemetry::default();
    let agg = telemetry.aggregator();

    let mut result = Anomalies::default();
    result.feature_anomalies.insert(
        "f".into(),
        anomaly(AnomalyType::SchemaNewColumn, Severity::Warning),
    );
    let before = result.clone();

    agg.update_telemetry(&result);
    assert_eq!(result, before, "aggregation must leave the result untouched");
}

#[test]
fn test_concurrent_updates_lose_nothing() {
    let telemetry = Telemetry::init(TelemetryConfig::default());

    // N parallel runs, each reporting one anomaly of the same kind.
    const N: usize = 32;
    std::thread::scope(|scope| {
        for _ in 0..N {
            let agg = telemetry.aggregator();
            scope.spawn(move || {
                let mut result = Anomalies::default();
                result.feature_anomalies.insert(
                    "shared".into(),
                    anomaly(AnomalyType::TypeMismatch, Severity::Error),
                );
                agg.update_telemetry(&result);
            });
        }
    });

    let snap = telemetry.snapshot();
    assert_eq!(snap.total_runs, N as u64);
    assert_eq!(snap.anomalous_runs, N as u64);
    assert_eq!(snap.counters.len(), 1);
    assert_eq!(snap.counters[0].count, N as u64, "no increment may be lost");
}
