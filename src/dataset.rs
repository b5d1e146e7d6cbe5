use ahash::AHashSet;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::HarnessError;

const MAX_KEY: i64 = 90;

const FIRST_NAMES: &[&str] = &[
    "Alice", "Benjamin", "Carla", "Dmitri", "Elena", "Farid", "Greta", "Hector", "Ingrid",
    "Jonas", "Katrin", "Lars", "Miriam", "Nadia", "Oskar", "Priya", "Quentin", "Rosa", "Sven",
    "Tamara", "Ulrik", "Vera", "Wendel", "Yusuf",
];

const LAST_NAMES: &[&str] = &[
    "Andersen", "Bianchi", "Costa", "Dubois", "Eriksen", "Fischer", "Garcia", "Holm", "Ivanov",
    "Jensen", "Kowalski", "Larsen", "Moreau", "Nilsen", "Okafor", "Petrov", "Quist", "Rossi",
    "Schmidt", "Tanaka", "Ueda", "Vargas", "Weber", "Zhang",
];

/// One synthetic row: a non-unique numeric key and a string payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub key: i64,
    pub value: String,
}

/// The four supported dataset scales form a closed enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatasetSize {
    Single,
    Small,
    Medium,
    Large,
}

impl DatasetSize {
    pub const ALL: [DatasetSize; 4] = [
        DatasetSize::Single,
        DatasetSize::Small,
        DatasetSize::Medium,
        DatasetSize::Large,
    ];

    pub fn record_count(self) -> usize {
        match self {
            DatasetSize::Single => 1,
            DatasetSize::Small => 100,
            DatasetSize::Medium => 500,
            DatasetSize::Large => 2000,
        }
    }

    pub fn from_count(count: usize) -> Result<Self, HarnessError> {
        DatasetSize::ALL
            .into_iter()
            .find(|size| size.record_count() == count)
            .ok_or_else(|| {
                HarnessError::invalid_input(format!(
                    "unsupported dataset size {count}, expected one of 1/100/500/2000"
                ))
            })
    }
}

/// Derived read-only statistics, computed once after generation.
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetStats {
    pub min_key: i64,
    pub max_key: i64,
    pub min_value: String,
    pub max_value: String,
    pub distinct_keys: usize,
}

#[derive(Clone, Debug)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Generates a reproducible dataset: keys are ages in 0..=90, values are
    /// synthetic full names, so key collisions are frequent at every scale.
    pub fn generate(size: DatasetSize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let records = (0..size.record_count())
            .map(|_| Record {
                key: rng.gen_range(0..=MAX_KEY),
                value: full_name(&mut rng),
            })
            .collect();
        Dataset { records }
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> Result<DatasetStats, HarnessError> {
        if self.records.is_empty() {
            return Err(HarnessError::invalid_input("cannot compute stats of an empty dataset"));
        }
        let mut min_key = i64::MAX;
        let mut max_key = i64::MIN;
        let mut min_value: Option<&str> = None;
        let mut max_value: Option<&str> = None;
        let mut keys = AHashSet::new();
        for rec in &self.records {
            min_key = min_key.min(rec.key);
            max_key = max_key.max(rec.key);
            if min_value.is_none_or(|v| rec.value.as_str() < v) {
                min_value = Some(&rec.value);
            }
            if max_value.is_none_or(|v| rec.value.as_str() > v) {
                max_value = Some(&rec.value);
            }
            keys.insert(rec.key);
        }
        Ok(DatasetStats {
            min_key,
            max_key,
            min_value: min_value.unwrap_or_default().to_string(),
            max_value: max_value.unwrap_or_default().to_string(),
            distinct_keys: keys.len(),
        })
    }

    /// All keys in record order, ascending-sorted and deduplicated.
    pub fn sorted_unique_keys(&self) -> Vec<i64> {
        let mut keys: Vec<i64> = self.records.iter().map(|r| r.key).collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }
}

fn full_name(rng: &mut StdRng) -> String {
    let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
    format!("{first} {last}")
}
