use std::{
    env, fs,
    path::{Path, PathBuf},
};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::HarnessError;
use crate::suite::{MeasuredResult, SuiteKind};

static HISTORY_FILE_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Overrides the history file location for this process. Tests use this to
/// avoid touching the default file.
pub fn set_history_file_path(path: PathBuf) {
    *HISTORY_FILE_OVERRIDE.lock() = Some(path);
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SuiteRecord {
    pub suite: String,
    pub candidate: String,
    pub ops_per_sec: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryComparison {
    pub suite: String,
    pub candidate: String,
    pub baseline_ops_per_sec: f64,
    pub current_ops_per_sec: f64,
    pub delta_ops_per_sec: f64,
    pub improved: bool,
}

/// Persists one suite's results, replacing any previous records for the same
/// suite and keeping everything else.
pub fn record_suite(kind: SuiteKind, results: &[MeasuredResult]) -> Result<(), HarnessError> {
    let path = history_file();
    let mut records = load_from(&path)?;
    records.retain(|r| r.suite != kind.label());
    for result in results {
        records.push(SuiteRecord {
            suite: kind.label().to_string(),
            candidate: result.candidate.clone(),
            ops_per_sec: result.throughput,
        });
    }
    records.sort_by(|a, b| {
        a.suite
            .cmp(&b.suite)
            .then_with(|| a.candidate.cmp(&b.candidate))
    });
    let data =
        serde_json::to_vec_pretty(&records).map_err(|e| HarnessError::history(e.to_string()))?;
    fs::write(path, data).map_err(|e| HarnessError::history(e.to_string()))
}

pub fn load_history() -> Result<Vec<SuiteRecord>, HarnessError> {
    load_from(&history_file())
}

/// Compares fresh results against the recorded baseline for one suite.
/// Candidates without a baseline record are skipped.
pub fn compare_to_baseline(
    kind: SuiteKind,
    results: &[MeasuredResult],
) -> Result<Vec<HistoryComparison>, HarnessError> {
    let baseline = load_from(&history_file())?;
    let mut comparisons = Vec::new();
    for result in results {
        let Some(previous) = baseline
            .iter()
            .find(|r| r.suite == kind.label() && r.candidate == result.candidate)
        else {
            continue;
        };
        let delta = result.throughput - previous.ops_per_sec;
        comparisons.push(HistoryComparison {
            suite: kind.label().to_string(),
            candidate: result.candidate.clone(),
            baseline_ops_per_sec: previous.ops_per_sec,
            current_ops_per_sec: result.throughput,
            delta_ops_per_sec: delta,
            improved: delta >= 0.0,
        });
    }
    Ok(comparisons)
}

fn history_file() -> PathBuf {
    if let Some(path) = HISTORY_FILE_OVERRIDE.lock().clone() {
        return path;
    }
    if let Ok(path) = env::var("ORDBENCH_HISTORY_FILE") {
        return PathBuf::from(path);
    }
    Path::new("ordbench_history.json").to_path_buf()
}

fn load_from(path: &Path) -> Result<Vec<SuiteRecord>, HarnessError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = fs::read(path).map_err(|e| HarnessError::history(e.to_string()))?;
    if data.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_slice(&data).map_err(|e| HarnessError::history(e.to_string()))
}
