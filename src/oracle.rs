use ahash::AHashSet;

use crate::dataset::{Dataset, Record};

/// Trusted linear-scan reference used to compute expected suite results.
/// Deliberately trivial: correctness must not depend on any candidate under
/// test. Rebuilt per suite, always before timing starts.
#[derive(Clone, Debug)]
pub struct ReferenceIndex {
    records: Vec<Record>,
}

impl ReferenceIndex {
    pub fn build(dataset: &Dataset) -> Self {
        ReferenceIndex {
            records: dataset.records().to_vec(),
        }
    }

    /// Every value stored under `key`, in insertion order.
    pub fn point_get(&self, key: i64) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| r.key == key)
            .map(|r| r.value.clone())
            .collect()
    }

    /// Unique-key projection: the value the last insert of `key` left behind.
    pub fn point_get_last(&self, key: i64) -> Option<String> {
        self.records
            .iter()
            .rev()
            .find(|r| r.key == key)
            .map(|r| r.value.clone())
    }

    /// All values as a sorted multiset.
    pub fn all_values_sorted(&self) -> Vec<String> {
        let mut values: Vec<String> = self.records.iter().map(|r| r.value.clone()).collect();
        values.sort();
        values
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn distinct_key_count(&self) -> usize {
        let keys: AHashSet<i64> = self.records.iter().map(|r| r.key).collect();
        keys.len()
    }

    fn in_range(key: i64, low: i64, high: i64, inclusive_high: bool) -> bool {
        key >= low && if inclusive_high { key <= high } else { key < high }
    }

    /// Records whose key lies in `[low, high]` or `[low, high)`.
    pub fn range_count(&self, low: i64, high: i64, inclusive_high: bool) -> usize {
        self.records
            .iter()
            .filter(|r| Self::in_range(r.key, low, high, inclusive_high))
            .count()
    }

    pub fn distinct_keys_in_range(&self, low: i64, high: i64, inclusive_high: bool) -> usize {
        let keys: AHashSet<i64> = self
            .records
            .iter()
            .filter(|r| Self::in_range(r.key, low, high, inclusive_high))
            .map(|r| r.key)
            .collect();
        keys.len()
    }

}

/// Distinct keys among a set of (key, value) removal pairs.
pub fn distinct_keys_among(pairs: &[(i64, String)]) -> usize {
    let keys: AHashSet<i64> = pairs.iter().map(|(k, _)| *k).collect();
    keys.len()
}
