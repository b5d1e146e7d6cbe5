use crate::HarnessError;
use crate::store::OrderedStore;

/// Unique-key candidate: a vec kept sorted by key, looked up with binary
/// search. Re-inserting a key overwrites its value, and removal matches on
/// the key alone, so validation must go through the `keys_are_unique` flag.
#[derive(Clone, Debug, Default)]
pub struct SortedVecStore {
    entries: Vec<(i64, String)>,
}

impl SortedVecStore {
    pub fn new() -> Self {
        SortedVecStore::default()
    }

    fn lower_bound(&self, key: i64) -> usize {
        self.entries.partition_point(|(k, _)| *k < key)
    }
}

impl OrderedStore for SortedVecStore {
    fn insert(&mut self, key: i64, value: &str) -> Result<(), HarnessError> {
        match self.entries.binary_search_by_key(&key, |(k, _)| *k) {
            Ok(idx) => self.entries[idx].1 = value.to_string(),
            Err(idx) => self.entries.insert(idx, (key, value.to_string())),
        }
        Ok(())
    }

    fn get_exact(&self, key: i64) -> Result<Vec<String>, HarnessError> {
        Ok(match self.entries.binary_search_by_key(&key, |(k, _)| *k) {
            Ok(idx) => vec![self.entries[idx].1.clone()],
            Err(_) => Vec::new(),
        })
    }

    fn get_all(&self, ascending: bool) -> Result<Vec<String>, HarnessError> {
        let values = self.entries.iter().map(|(_, v)| v.clone());
        Ok(if ascending {
            values.collect()
        } else {
            values.rev().collect()
        })
    }

    fn get_range(
        &self,
        low: i64,
        high: i64,
        inclusive_high: bool,
    ) -> Result<Vec<String>, HarnessError> {
        if low > high {
            return Ok(Vec::new());
        }
        let start = self.lower_bound(low);
        let end = if inclusive_high {
            self.entries.partition_point(|(k, _)| *k <= high)
        } else {
            self.lower_bound(high)
        };
        if start >= end {
            return Ok(Vec::new());
        }
        Ok(self.entries[start..end]
            .iter()
            .map(|(_, v)| v.clone())
            .collect())
    }

    fn remove(&mut self, key: i64, _value: &str) -> Result<bool, HarnessError> {
        match self.entries.binary_search_by_key(&key, |(k, _)| *k) {
            Ok(idx) => {
                self.entries.remove(idx);
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }
}
