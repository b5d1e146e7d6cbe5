use ordbench::history::{
    SuiteRecord, compare_to_baseline, load_history, record_suite, set_history_file_path,
};
use ordbench::suite::{MeasuredResult, SuiteKind};

fn measured(candidate: &str, throughput: f64) -> MeasuredResult {
    MeasuredResult {
        candidate: candidate.to_string(),
        throughput,
    }
}

// One test covers the whole lifecycle: the history file location is process
// global, so splitting this up would let parallel tests race on the path.
#[test]
fn test_history_roundtrip_replacement_and_comparison() {
    let dir = tempfile::tempdir().unwrap();
    set_history_file_path(dir.path().join("history.json"));

    assert!(load_history().unwrap().is_empty());

    record_suite(
        SuiteKind::Insert,
        &[measured("btree", 1200.0), measured("scan-vec", 300.0)],
    )
    .unwrap();
    record_suite(SuiteKind::PointGet, &[measured("btree", 9000.0)]).unwrap();

    let records = load_history().unwrap();
    assert_eq!(records.len(), 3);
    assert!(records.contains(&SuiteRecord {
        suite: "insert".to_string(),
        candidate: "scan-vec".to_string(),
        ops_per_sec: 300.0,
    }));

    // Re-recording a suite replaces only that suite's records.
    record_suite(SuiteKind::Insert, &[measured("btree", 1500.0)]).unwrap();
    let records = load_history().unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().any(|r| r.suite == "get"));
    assert!(
        records
            .iter()
            .any(|r| r.suite == "insert" && r.ops_per_sec == 1500.0)
    );

    let comparisons = compare_to_baseline(
        SuiteKind::Insert,
        &[measured("btree", 1800.0), measured("unknown", 10.0)],
    )
    .unwrap();
    // Candidates without a baseline are skipped.
    assert_eq!(comparisons.len(), 1);
    assert_eq!(comparisons[0].candidate, "btree");
    assert_eq!(comparisons[0].baseline_ops_per_sec, 1500.0);
    assert_eq!(comparisons[0].delta_ops_per_sec, 300.0);
    assert!(comparisons[0].improved);

    let regressed = compare_to_baseline(SuiteKind::Insert, &[measured("btree", 900.0)]).unwrap();
    assert!(!regressed[0].improved);
}
