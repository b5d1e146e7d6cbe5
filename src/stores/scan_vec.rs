use crate::HarnessError;
use crate::store::OrderedStore;

/// Baseline candidate: an unsorted vec, every read is a linear scan.
#[derive(Clone, Debug, Default)]
pub struct ScanVecStore {
    entries: Vec<(i64, String)>,
}

impl ScanVecStore {
    pub fn new() -> Self {
        ScanVecStore::default()
    }
}

impl OrderedStore for ScanVecStore {
    fn insert(&mut self, key: i64, value: &str) -> Result<(), HarnessError> {
        self.entries.push((key, value.to_string()));
        Ok(())
    }

    fn get_exact(&self, key: i64) -> Result<Vec<String>, HarnessError> {
        Ok(self
            .entries
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v.clone())
            .collect())
    }

    fn get_all(&self, ascending: bool) -> Result<Vec<String>, HarnessError> {
        let mut sorted = self.entries.clone();
        // Stable sort keeps insertion order within equal keys.
        if ascending {
            sorted.sort_by_key(|(k, _)| *k);
        } else {
            sorted.sort_by(|a, b| b.0.cmp(&a.0));
        }
        Ok(sorted.into_iter().map(|(_, v)| v).collect())
    }

    fn get_range(
        &self,
        low: i64,
        high: i64,
        inclusive_high: bool,
    ) -> Result<Vec<String>, HarnessError> {
        Ok(self
            .entries
            .iter()
            .filter(|(k, _)| *k >= low && if inclusive_high { *k <= high } else { *k < high })
            .map(|(_, v)| v.clone())
            .collect())
    }

    fn remove(&mut self, key: i64, value: &str) -> Result<bool, HarnessError> {
        match self
            .entries
            .iter()
            .position(|(k, v)| *k == key && v == value)
        {
            Some(pos) => {
                self.entries.remove(pos);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
