use std::cell::Cell;
use std::rc::Rc;

use ordbench::HarnessError;
use ordbench::dataset::{Dataset, Record};
use ordbench::measure::{MeasureConfig, SetupPolicy, measure_throughput};
use ordbench::store::{CandidateDescriptor, OrderedStore, StoreCapabilities};
use ordbench::stores::BTreeStore;
use ordbench::suite::{SuiteKind, run_suite};
use ordbench::workloads::{build_plan, range_bounds};

fn rec(key: i64, value: &str) -> Record {
    Record {
        key,
        value: value.to_string(),
    }
}

fn small_dataset() -> Rc<Dataset> {
    Rc::new(Dataset::from_records(vec![
        rec(3, "c1"),
        rec(1, "a"),
        rec(3, "c2"),
        rec(7, "g"),
        rec(5, "e"),
        rec(9, "i"),
    ]))
}

fn btree_candidate(name: &str) -> CandidateDescriptor {
    CandidateDescriptor::new(
        name,
        StoreCapabilities::multimap(),
        Rc::new(|| Ok(Box::new(BTreeStore::new()) as Box<dyn OrderedStore>)),
    )
}

/// A candidate whose point lookups always come back empty. Inserts work, so
/// preloading succeeds and only validation can catch it.
struct LossyStore {
    inner: BTreeStore,
}

impl OrderedStore for LossyStore {
    fn insert(&mut self, key: i64, value: &str) -> Result<(), HarnessError> {
        self.inner.insert(key, value)
    }

    fn get_exact(&self, _key: i64) -> Result<Vec<String>, HarnessError> {
        Ok(Vec::new())
    }

    fn get_all(&self, ascending: bool) -> Result<Vec<String>, HarnessError> {
        self.inner.get_all(ascending)
    }

    fn get_range(
        &self,
        low: i64,
        high: i64,
        inclusive_high: bool,
    ) -> Result<Vec<String>, HarnessError> {
        self.inner.get_range(low, high, inclusive_high)
    }

    fn remove(&mut self, _key: i64, _value: &str) -> Result<bool, HarnessError> {
        // Pretends to remove but never does.
        Ok(true)
    }
}

fn lossy_candidate() -> CandidateDescriptor {
    CandidateDescriptor::new(
        "lossy",
        StoreCapabilities::multimap(),
        Rc::new(|| {
            Ok(Box::new(LossyStore {
                inner: BTreeStore::new(),
            }) as Box<dyn OrderedStore>)
        }),
    )
}

#[test]
fn test_suite_preserves_candidate_order_and_positive_throughput() {
    let dataset = small_dataset();
    let candidates = vec![btree_candidate("first"), btree_candidate("second")];
    for kind in SuiteKind::ALL {
        let mut plan = build_plan(kind, &dataset, &candidates, 1).unwrap();
        let results = run_suite(&mut plan, &MeasureConfig::quick()).unwrap();
        let names: Vec<&str> = results.iter().map(|r| r.candidate.as_str()).collect();
        assert_eq!(names, vec!["first", "second"], "suite {}", kind.label());
        assert!(results.iter().all(|r| r.throughput > 0.0));
    }
}

#[test]
fn test_point_get_validation_mismatch_aborts() {
    let dataset = small_dataset();
    let candidates = vec![btree_candidate("honest"), lossy_candidate()];
    let mut plan = build_plan(SuiteKind::PointGet, &dataset, &candidates, 1).unwrap();
    let err = run_suite(&mut plan, &MeasureConfig::quick()).unwrap_err();
    match err {
        HarnessError::ValidationMismatch {
            operation,
            candidate,
            ..
        } => {
            assert_eq!(operation, "get");
            assert_eq!(candidate, "lossy");
        }
        other => panic!("expected validation mismatch, got {other}"),
    }
}

#[test]
fn test_remove_validation_detects_phantom_removal() {
    let dataset = small_dataset();
    let candidates = vec![lossy_candidate()];
    let mut plan = build_plan(SuiteKind::Remove, &dataset, &candidates, 1).unwrap();
    let err = run_suite(&mut plan, &MeasureConfig::quick()).unwrap_err();
    assert!(matches!(err, HarnessError::ValidationMismatch { .. }));
}

#[test]
fn test_insert_suite_has_no_intrinsic_validation() {
    // The lossy store inserts correctly, so the insert suite passes; its
    // defects only surface in later suites.
    let dataset = small_dataset();
    let candidates = vec![lossy_candidate()];
    let mut plan = build_plan(SuiteKind::Insert, &dataset, &candidates, 1).unwrap();
    assert!(run_suite(&mut plan, &MeasureConfig::quick()).is_ok());
}

#[test]
fn test_empty_inputs_rejected_at_plan_time() {
    let dataset = small_dataset();
    assert!(build_plan(SuiteKind::Insert, &dataset, &[], 1).is_err());
    let empty = Rc::new(Dataset::from_records(Vec::new()));
    assert!(build_plan(SuiteKind::Insert, &empty, &[btree_candidate("x")], 1).is_err());
}

#[test]
fn test_suite_kind_order_and_initials() {
    let labels: Vec<&str> = SuiteKind::ALL.iter().map(|k| k.label()).collect();
    assert_eq!(labels, vec!["insert", "get", "get-all", "get-range", "remove"]);
    let initials: Vec<&str> = SuiteKind::ALL.iter().map(|k| k.initial()).collect();
    assert_eq!(initials, vec!["i", "g", "a", "r", "e"]);
}

#[test]
fn test_range_bounds_sit_a_fifth_in_from_each_end() {
    let dataset = Dataset::from_records(
        (0..10i64).map(|k| rec(k, "v")).collect(),
    );
    assert_eq!(range_bounds(&dataset), (2, 8));

    let single = Dataset::from_records(vec![rec(4, "v")]);
    assert_eq!(range_bounds(&single), (4, 4));
}

#[test]
fn test_every_repetition_setup_runs_before_each_measured_pass() {
    let prepares = Rc::new(Cell::new(0u32));
    let measures = Rc::new(Cell::new(0u32));
    let mut prepare: Box<dyn FnMut() -> Result<(), HarnessError>> = {
        let prepares = prepares.clone();
        Box::new(move || {
            prepares.set(prepares.get() + 1);
            Ok(())
        })
    };
    let mut measured: Box<dyn FnMut() -> Result<(), HarnessError>> = {
        let measures = measures.clone();
        Box::new(move || {
            measures.set(measures.get() + 1);
            Ok(())
        })
    };
    let throughput = measure_throughput(
        &MeasureConfig::quick(),
        SetupPolicy::EveryRepetition,
        &mut prepare,
        &mut measured,
    )
    .unwrap();
    assert!(throughput > 0.0);
    // One prepare before the first pass, one between every pair, none after
    // the last: counts match exactly.
    assert_eq!(prepares.get(), measures.get());
}

#[test]
fn test_setup_once_runs_exactly_once() {
    let prepares = Rc::new(Cell::new(0u32));
    let mut prepare: Box<dyn FnMut() -> Result<(), HarnessError>> = {
        let prepares = prepares.clone();
        Box::new(move || {
            prepares.set(prepares.get() + 1);
            Ok(())
        })
    };
    let mut measured: Box<dyn FnMut() -> Result<(), HarnessError>> = Box::new(|| Ok(()));
    measure_throughput(
        &MeasureConfig::quick(),
        SetupPolicy::Once,
        &mut prepare,
        &mut measured,
    )
    .unwrap();
    assert_eq!(prepares.get(), 1);
}
