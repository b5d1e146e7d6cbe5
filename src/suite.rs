use crate::HarnessError;
use crate::measure::{MeasureConfig, SetupPolicy, StepFn, measure_throughput};

/// The five operation suites, in their fixed execution order. Later suites
/// assume earlier insert semantics held, so the order never changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuiteKind {
    Insert,
    PointGet,
    GetAll,
    GetRange,
    Remove,
}

impl SuiteKind {
    pub const ALL: [SuiteKind; 5] = [
        SuiteKind::Insert,
        SuiteKind::PointGet,
        SuiteKind::GetAll,
        SuiteKind::GetRange,
        SuiteKind::Remove,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SuiteKind::Insert => "insert",
            SuiteKind::PointGet => "get",
            SuiteKind::GetAll => "get-all",
            SuiteKind::GetRange => "get-range",
            SuiteKind::Remove => "remove",
        }
    }

    /// Single-letter column header used in the final ranking table.
    pub fn initial(self) -> &'static str {
        match self {
            SuiteKind::Insert => "i",
            SuiteKind::PointGet => "g",
            SuiteKind::GetAll => "a",
            SuiteKind::GetRange => "r",
            SuiteKind::Remove => "e",
        }
    }
}

/// One candidate's closure triple within a suite: untimed `prepare`, the
/// timed `measured` operation, and an untimed post-measurement `validate`.
pub struct CandidateRun {
    pub name: String,
    pub setup: SetupPolicy,
    pub prepare: StepFn,
    pub measured: StepFn,
    pub validate: Option<StepFn>,
}

/// One suite, fully planned: oracle expectations are already computed and
/// baked into the validate closures before any timing starts.
pub struct SuitePlan {
    pub kind: SuiteKind,
    pub runs: Vec<CandidateRun>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeasuredResult {
    pub candidate: String,
    pub throughput: f64,
}

/// Executes one suite: candidates strictly one after another, never
/// interleaved. Any measurement or validation failure aborts immediately;
/// there is no per-candidate skip.
pub fn run_suite(
    plan: &mut SuitePlan,
    cfg: &MeasureConfig,
) -> Result<Vec<MeasuredResult>, HarnessError> {
    let mut results = Vec::with_capacity(plan.runs.len());
    for run in &mut plan.runs {
        let throughput = measure_throughput(cfg, run.setup, &mut run.prepare, &mut run.measured)
            .map_err(|err| match err {
                HarnessError::Measurement(msg) => HarnessError::measurement(format!(
                    "{} suite, candidate {}: {msg}",
                    plan.kind.label(),
                    run.name
                )),
                other => other,
            })?;
        if let Some(validate) = run.validate.as_mut() {
            validate()?;
        }
        results.push(MeasuredResult {
            candidate: run.name.clone(),
            throughput,
        });
    }
    Ok(results)
}
