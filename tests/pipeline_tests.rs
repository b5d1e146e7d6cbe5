use ordbench::dataset::DatasetSize;
use ordbench::measure::MeasureConfig;
use ordbench::pipeline::Pipeline;
use ordbench::suite::SuiteKind;

#[test]
fn test_full_run_produces_five_validated_suites() {
    let pipeline = Pipeline::new(DatasetSize::Small, 21).with_measure(MeasureConfig::quick());
    let report = pipeline.run().unwrap();

    let kinds: Vec<SuiteKind> = report.suites.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, SuiteKind::ALL.to_vec());

    let candidate_count = pipeline.candidates().len();
    for suite in &report.suites {
        assert_eq!(suite.results.len(), candidate_count);
        assert!(suite.results.iter().all(|r| r.throughput > 0.0));
        assert!(!suite.table.is_empty());
    }
}

#[test]
fn test_final_table_ranks_every_candidate_across_all_suites() {
    let pipeline = Pipeline::new(DatasetSize::Small, 3).with_measure(MeasureConfig::quick());
    let report = pipeline.run().unwrap();

    let table = &report.final_table;
    assert_eq!(table[0], vec!["", "", "i", "g", "a", "r", "e"]);
    assert_eq!(table.len(), 1 + pipeline.candidates().len());

    // Best candidate always reads 1.00; scores ascend; every candidate has
    // one place per suite.
    assert_eq!(table[1][0], "1.00");
    let scores: Vec<f64> = table[1..]
        .iter()
        .map(|row| row[0].parse::<f64>().unwrap())
        .collect();
    assert!(scores.windows(2).all(|w| w[0] <= w[1]));
    for row in &table[1..] {
        assert_eq!(row.len(), 2 + SuiteKind::ALL.len());
        for place in &row[2..] {
            let place: usize = place.parse().unwrap();
            assert!((1..=pipeline.candidates().len()).contains(&place));
        }
    }
}

#[test]
fn test_single_record_dataset_runs_cleanly() {
    let pipeline = Pipeline::new(DatasetSize::Single, 8).with_measure(MeasureConfig::quick());
    let report = pipeline.run().unwrap();
    assert_eq!(report.suites.len(), 5);
}

#[test]
fn test_independent_pipelines_do_not_share_state() {
    let quick = MeasureConfig::quick();
    let first = Pipeline::new(DatasetSize::Small, 4)
        .with_measure(quick)
        .run()
        .unwrap();
    let second = Pipeline::new(DatasetSize::Small, 4)
        .with_measure(quick)
        .run()
        .unwrap();
    // Places would double up if aggregation state leaked between runs.
    for report in [&first, &second] {
        for row in &report.final_table[1..] {
            assert_eq!(row.len(), 2 + SuiteKind::ALL.len());
        }
    }
    assert_eq!(first.suites.len(), second.suites.len());
}
