use std::cell::RefCell;
use std::rc::Rc;

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::HarnessError;
use crate::dataset::Dataset;
use crate::measure::{SetupPolicy, StepFn};
use crate::oracle::{ReferenceIndex, distinct_keys_among};
use crate::store::{CandidateDescriptor, OrderedStore};
use crate::suite::{CandidateRun, SuiteKind, SuitePlan};

/// Point-get and remove suites each sample up to this many entries,
/// clamped to the dataset size.
pub const SAMPLE_LIMIT: usize = 50;

const GET_SEED: u64 = 0x51AD;
const REMOVE_SEED: u64 = 0x9E3D;

type SharedStore = Rc<RefCell<Box<dyn OrderedStore>>>;

/// Builds one suite's plan across all candidates. Oracle expectations are
/// computed here, before any timed run, so their cost never contaminates
/// measured throughput.
pub fn build_plan(
    kind: SuiteKind,
    dataset: &Rc<Dataset>,
    candidates: &[CandidateDescriptor],
    seed: u64,
) -> Result<SuitePlan, HarnessError> {
    if dataset.is_empty() {
        return Err(HarnessError::invalid_input("dataset must not be empty"));
    }
    if candidates.is_empty() {
        return Err(HarnessError::invalid_input("candidate set must not be empty"));
    }
    let runs = match kind {
        SuiteKind::Insert => insert_runs(dataset, candidates)?,
        SuiteKind::PointGet => point_get_runs(dataset, candidates, seed)?,
        SuiteKind::GetAll => get_all_runs(dataset, candidates)?,
        SuiteKind::GetRange => get_range_runs(dataset, candidates)?,
        SuiteKind::Remove => remove_runs(dataset, candidates, seed)?,
    };
    Ok(SuitePlan { kind, runs })
}

fn preload(store: &mut dyn OrderedStore, dataset: &Dataset) -> Result<(), HarnessError> {
    for rec in dataset.records() {
        store.insert(rec.key, &rec.value)?;
    }
    Ok(())
}

fn shared_store(candidate: &CandidateDescriptor) -> Result<SharedStore, HarnessError> {
    Ok(Rc::new(RefCell::new(candidate.fresh_store()?)))
}

/// Recreates the candidate's structure, empty.
fn fresh_prepare(store: &SharedStore, candidate: &CandidateDescriptor) -> StepFn {
    let store = store.clone();
    let candidate = candidate.clone();
    Box::new(move || {
        *store.borrow_mut() = candidate.fresh_store()?;
        Ok(())
    })
}

/// Recreates the candidate's structure and loads the whole dataset, untimed.
fn preloaded_prepare(
    store: &SharedStore,
    candidate: &CandidateDescriptor,
    dataset: &Rc<Dataset>,
) -> StepFn {
    let store = store.clone();
    let candidate = candidate.clone();
    let dataset = dataset.clone();
    Box::new(move || {
        let mut fresh = candidate.fresh_store()?;
        preload(fresh.as_mut(), &dataset)?;
        *store.borrow_mut() = fresh;
        Ok(())
    })
}

fn sampled_keys(dataset: &Dataset, seed: u64) -> Vec<i64> {
    let mut keys: Vec<i64> = dataset.records().iter().map(|r| r.key).collect();
    keys.shuffle(&mut StdRng::seed_from_u64(seed));
    keys.truncate(SAMPLE_LIMIT);
    keys
}

fn sampled_removals(dataset: &Dataset, seed: u64) -> Vec<(i64, String)> {
    let mut pairs: Vec<(i64, String)> = dataset
        .records()
        .iter()
        .map(|r| (r.key, r.value.clone()))
        .collect();
    pairs.shuffle(&mut StdRng::seed_from_u64(seed));
    pairs.truncate(SAMPLE_LIMIT);
    pairs
}

fn insert_runs(
    dataset: &Rc<Dataset>,
    candidates: &[CandidateDescriptor],
) -> Result<Vec<CandidateRun>, HarnessError> {
    let mut runs = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let store = shared_store(candidate)?;
        let measured: StepFn = {
            let store = store.clone();
            let dataset = dataset.clone();
            Box::new(move || {
                let mut store = store.borrow_mut();
                preload(store.as_mut(), &dataset)
            })
        };
        runs.push(CandidateRun {
            name: candidate.name.clone(),
            setup: SetupPolicy::EveryRepetition,
            prepare: fresh_prepare(&store, candidate),
            measured,
            // No intrinsic check: insert correctness is observed by every
            // later suite, which all preload through the same path.
            validate: None,
        });
    }
    Ok(runs)
}

fn point_get_runs(
    dataset: &Rc<Dataset>,
    candidates: &[CandidateDescriptor],
    seed: u64,
) -> Result<Vec<CandidateRun>, HarnessError> {
    let oracle = ReferenceIndex::build(dataset);
    let keys = Rc::new(sampled_keys(dataset, seed ^ GET_SEED));

    let expected_multi: Rc<Vec<Vec<String>>> = Rc::new(
        keys.iter()
            .map(|&key| {
                let mut bucket = oracle.point_get(key);
                bucket.sort();
                bucket
            })
            .collect(),
    );
    let expected_unique: Rc<Vec<Vec<String>>> = Rc::new(
        keys.iter()
            .map(|&key| oracle.point_get_last(key).into_iter().collect())
            .collect(),
    );

    let mut runs = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let store = shared_store(candidate)?;
        let output: Rc<RefCell<Vec<Vec<String>>>> = Rc::new(RefCell::new(Vec::new()));

        let measured: StepFn = {
            let store = store.clone();
            let keys = keys.clone();
            let output = output.clone();
            Box::new(move || {
                let store = store.borrow();
                let mut buckets = Vec::with_capacity(keys.len());
                for &key in keys.iter() {
                    buckets.push(store.get_exact(key)?);
                }
                *output.borrow_mut() = buckets;
                Ok(())
            })
        };

        let expected = if candidate.caps.keys_are_unique {
            expected_unique.clone()
        } else {
            expected_multi.clone()
        };
        let validate: StepFn = {
            let keys = keys.clone();
            let output = output.clone();
            let name = candidate.name.clone();
            Box::new(move || {
                let actual = output.borrow();
                for (i, (&key, want)) in keys.iter().zip(expected.iter()).enumerate() {
                    // Bucket order is insignificant; the multiset must match.
                    let mut got = actual.get(i).cloned().unwrap_or_default();
                    got.sort();
                    if &got != want {
                        return Err(HarnessError::mismatch(
                            SuiteKind::PointGet.label().to_string(),
                            name.clone(),
                            format!("key {key} -> {want:?}"),
                            format!("key {key} -> {got:?}"),
                        ));
                    }
                }
                Ok(())
            })
        };

        runs.push(CandidateRun {
            name: candidate.name.clone(),
            setup: SetupPolicy::Once,
            prepare: preloaded_prepare(&store, candidate, dataset),
            measured,
            validate: Some(validate),
        });
    }
    Ok(runs)
}

fn get_all_runs(
    dataset: &Rc<Dataset>,
    candidates: &[CandidateDescriptor],
) -> Result<Vec<CandidateRun>, HarnessError> {
    let oracle = ReferenceIndex::build(dataset);
    let expected_sorted = Rc::new(oracle.all_values_sorted());
    let distinct_keys = oracle.distinct_key_count();

    let mut runs = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let store = shared_store(candidate)?;
        let output: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

        let measured: StepFn = {
            let store = store.clone();
            let output = output.clone();
            Box::new(move || {
                *output.borrow_mut() = store.borrow().get_all(true)?;
                Ok(())
            })
        };

        // Both sides are sorted before comparison, so this checks content
        // and cardinality, not the ascending-key contract itself.
        let validate: StepFn = if candidate.caps.keys_are_unique {
            let output = output.clone();
            let name = candidate.name.clone();
            Box::new(move || {
                let got = output.borrow().len();
                if got != distinct_keys {
                    return Err(HarnessError::mismatch(
                        SuiteKind::GetAll.label().to_string(),
                        name.clone(),
                        format!("{distinct_keys} values (one per distinct key)"),
                        format!("{got} values"),
                    ));
                }
                Ok(())
            })
        } else {
            let output = output.clone();
            let expected = expected_sorted.clone();
            let name = candidate.name.clone();
            Box::new(move || {
                let mut got = output.borrow().clone();
                got.sort();
                if got != *expected {
                    return Err(HarnessError::mismatch(
                        SuiteKind::GetAll.label().to_string(),
                        name.clone(),
                        summarize_values(&expected),
                        summarize_values(&got),
                    ));
                }
                Ok(())
            })
        };

        runs.push(CandidateRun {
            name: candidate.name.clone(),
            setup: SetupPolicy::Once,
            prepare: preloaded_prepare(&store, candidate, dataset),
            measured,
            validate: Some(validate),
        });
    }
    Ok(runs)
}

fn get_range_runs(
    dataset: &Rc<Dataset>,
    candidates: &[CandidateDescriptor],
) -> Result<Vec<CandidateRun>, HarnessError> {
    let oracle = ReferenceIndex::build(dataset);
    let (low, high) = range_bounds(dataset);

    let mut runs = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        // Each candidate is measured under its own declared upper-bound
        // convention, and the expectation uses the same interpretation.
        let inclusive = candidate.caps.range_upper_inclusive;
        let expected_count = if candidate.caps.keys_are_unique {
            oracle.distinct_keys_in_range(low, high, inclusive)
        } else {
            oracle.range_count(low, high, inclusive)
        };

        let store = shared_store(candidate)?;
        let output = Rc::new(RefCell::new(0usize));

        let measured: StepFn = {
            let store = store.clone();
            let output = output.clone();
            Box::new(move || {
                *output.borrow_mut() = store.borrow().get_range(low, high, inclusive)?.len();
                Ok(())
            })
        };

        let validate: StepFn = {
            let output = output.clone();
            let name = candidate.name.clone();
            Box::new(move || {
                let got = *output.borrow();
                if got != expected_count {
                    return Err(HarnessError::mismatch(
                        SuiteKind::GetRange.label().to_string(),
                        name.clone(),
                        format!("{expected_count} values in [{low}, {high}]"),
                        format!("{got} values"),
                    ));
                }
                Ok(())
            })
        };

        runs.push(CandidateRun {
            name: candidate.name.clone(),
            setup: SetupPolicy::Once,
            prepare: preloaded_prepare(&store, candidate, dataset),
            measured,
            validate: Some(validate),
        });
    }
    Ok(runs)
}

fn remove_runs(
    dataset: &Rc<Dataset>,
    candidates: &[CandidateDescriptor],
    seed: u64,
) -> Result<Vec<CandidateRun>, HarnessError> {
    let oracle = ReferenceIndex::build(dataset);
    let removals = Rc::new(sampled_removals(dataset, seed ^ REMOVE_SEED));
    let removed_count = removals.len();
    let removed_distinct = distinct_keys_among(&removals);

    let mut runs = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let expected_remaining = if candidate.caps.keys_are_unique {
            // Duplicate keys collapse on insert, and repeated removals of the
            // same key only take effect once.
            oracle.distinct_key_count() - removed_distinct
        } else {
            oracle.record_count() - removed_count
        };

        let store = shared_store(candidate)?;

        let measured: StepFn = {
            let store = store.clone();
            let removals = removals.clone();
            Box::new(move || {
                let mut store = store.borrow_mut();
                for (key, value) in removals.iter() {
                    store.remove(*key, value)?;
                }
                Ok(())
            })
        };

        let validate: StepFn = {
            let store = store.clone();
            let name = candidate.name.clone();
            Box::new(move || {
                let got = store.borrow().get_all(true)?.len();
                if got != expected_remaining {
                    return Err(HarnessError::mismatch(
                        SuiteKind::Remove.label().to_string(),
                        name.clone(),
                        format!("{expected_remaining} values remaining"),
                        format!("{got} values remaining"),
                    ));
                }
                Ok(())
            })
        };

        runs.push(CandidateRun {
            name: candidate.name.clone(),
            setup: SetupPolicy::EveryRepetition,
            prepare: preloaded_prepare(&store, candidate, dataset),
            measured,
            validate: Some(validate),
        });
    }
    Ok(runs)
}

/// Range bounds sit a fifth of the way in from each end of the sorted unique
/// keys, clamped for datasets with fewer than five distinct keys.
pub fn range_bounds(dataset: &Dataset) -> (i64, i64) {
    let keys = dataset.sorted_unique_keys();
    let fifth = keys.len() / 5;
    let low = keys[fifth];
    let high = keys[(keys.len() - fifth).min(keys.len() - 1)];
    (low, high)
}

fn summarize_values(values: &[String]) -> String {
    const SHOWN: usize = 5;
    if values.len() <= SHOWN {
        format!("{} values {:?}", values.len(), values)
    } else {
        format!("{} values, starting {:?}", values.len(), &values[..SHOWN])
    }
}
