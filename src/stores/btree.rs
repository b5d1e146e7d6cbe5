use std::collections::BTreeMap;
use std::ops::Bound;

use crate::HarnessError;
use crate::store::OrderedStore;

/// Ordered multimap candidate backed by `BTreeMap<i64, Vec<String>>`.
/// Duplicate keys accumulate in per-key buckets in insertion order.
#[derive(Clone, Debug, Default)]
pub struct BTreeStore {
    map: BTreeMap<i64, Vec<String>>,
}

impl BTreeStore {
    pub fn new() -> Self {
        BTreeStore::default()
    }
}

impl OrderedStore for BTreeStore {
    fn insert(&mut self, key: i64, value: &str) -> Result<(), HarnessError> {
        self.map.entry(key).or_default().push(value.to_string());
        Ok(())
    }

    fn get_exact(&self, key: i64) -> Result<Vec<String>, HarnessError> {
        Ok(self.map.get(&key).cloned().unwrap_or_default())
    }

    fn get_all(&self, ascending: bool) -> Result<Vec<String>, HarnessError> {
        let mut values = Vec::new();
        if ascending {
            for bucket in self.map.values() {
                values.extend(bucket.iter().cloned());
            }
        } else {
            for bucket in self.map.values().rev() {
                values.extend(bucket.iter().cloned());
            }
        }
        Ok(values)
    }

    fn get_range(
        &self,
        low: i64,
        high: i64,
        inclusive_high: bool,
    ) -> Result<Vec<String>, HarnessError> {
        if low > high || (low == high && !inclusive_high) {
            return Ok(Vec::new());
        }
        let upper = if inclusive_high {
            Bound::Included(high)
        } else {
            Bound::Excluded(high)
        };
        let mut values = Vec::new();
        for (_, bucket) in self.map.range((Bound::Included(low), upper)) {
            values.extend(bucket.iter().cloned());
        }
        Ok(values)
    }

    fn remove(&mut self, key: i64, value: &str) -> Result<bool, HarnessError> {
        let Some(bucket) = self.map.get_mut(&key) else {
            return Ok(false);
        };
        let Some(pos) = bucket.iter().position(|v| v == value) else {
            return Ok(false);
        };
        bucket.remove(pos);
        if bucket.is_empty() {
            self.map.remove(&key);
        }
        Ok(true)
    }
}
