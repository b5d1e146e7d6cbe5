use std::rc::Rc;

use crate::HarnessError;
use crate::compile::{RankingAggregator, compile_final, compile_suite};
use crate::dataset::{Dataset, DatasetSize};
use crate::measure::MeasureConfig;
use crate::store::CandidateDescriptor;
use crate::stores::default_candidates;
use crate::suite::{MeasuredResult, SuiteKind, run_suite};
use crate::workloads::build_plan;

/// One suite's output: the per-candidate measurements and the compiled
/// ranking table.
#[derive(Clone, Debug)]
pub struct SuiteReport {
    pub kind: SuiteKind,
    pub results: Vec<MeasuredResult>,
    pub table: Vec<Vec<String>>,
}

#[derive(Clone, Debug)]
pub struct RunReport {
    pub suites: Vec<SuiteReport>,
    pub final_table: Vec<Vec<String>>,
}

/// The whole fixed pipeline: one dataset, one candidate set, the five suites
/// in `SuiteKind::ALL` order, strictly sequential. Each suite folds into the
/// aggregator before the next starts; the first failure aborts everything
/// with no partial report.
pub struct Pipeline {
    dataset: Rc<Dataset>,
    candidates: Vec<CandidateDescriptor>,
    measure: MeasureConfig,
    seed: u64,
}

impl Pipeline {
    pub fn new(size: DatasetSize, seed: u64) -> Self {
        Pipeline {
            dataset: Rc::new(Dataset::generate(size, seed)),
            candidates: default_candidates(),
            measure: MeasureConfig::default(),
            seed,
        }
    }

    pub fn with_candidates(mut self, candidates: Vec<CandidateDescriptor>) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn with_measure(mut self, measure: MeasureConfig) -> Self {
        self.measure = measure;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn candidates(&self) -> &[CandidateDescriptor] {
        &self.candidates
    }

    pub fn run(&self) -> Result<RunReport, HarnessError> {
        let mut aggregator = RankingAggregator::new();
        let mut suites = Vec::with_capacity(SuiteKind::ALL.len());
        for kind in SuiteKind::ALL {
            let mut plan = build_plan(kind, &self.dataset, &self.candidates, self.seed)?;
            let results = run_suite(&mut plan, &self.measure)?;
            let table = compile_suite(kind, &results, &mut aggregator)?;
            suites.push(SuiteReport {
                kind,
                results,
                table,
            });
        }
        let final_table = compile_final(&aggregator)?;
        Ok(RunReport {
            suites,
            final_table,
        })
    }
}
