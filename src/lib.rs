//! Comparative benchmark harness for ordered key-value store implementations.
//! Runs each candidate through the same five operation suites, validates
//! every result against a linear-scan reference index, and ranks candidates
//! by cumulative normalized slowness (1.00 = always fastest).

pub mod compile;
pub mod dataset;
pub mod errors;
pub mod history;
pub mod measure;
pub mod oracle;
pub mod pipeline;
pub mod report;
pub mod store;
pub mod stores;
pub mod suite;
pub mod workloads;

pub use crate::compile::{RankingAggregator, ScoreEntry};
pub use crate::dataset::{Dataset, DatasetSize, DatasetStats, Record};
pub use crate::errors::HarnessError;
pub use crate::measure::{MeasureConfig, SetupPolicy};
pub use crate::oracle::ReferenceIndex;
pub use crate::pipeline::{Pipeline, RunReport, SuiteReport};
pub use crate::store::{CandidateDescriptor, OrderedStore, StoreCapabilities};
pub use crate::suite::{MeasuredResult, SuiteKind};
