use std::rc::Rc;

use crate::HarnessError;

/// Narrow capability surface through which every candidate is exercised.
/// The harness never looks inside a candidate's structure.
pub trait OrderedStore {
    fn insert(&mut self, key: i64, value: &str) -> Result<(), HarnessError>;

    /// Every value stored under `key`, bucket order unspecified.
    fn get_exact(&self, key: i64) -> Result<Vec<String>, HarnessError>;

    /// All values in key order, ascending or descending.
    fn get_all(&self, ascending: bool) -> Result<Vec<String>, HarnessError>;

    fn get_range(
        &self,
        low: i64,
        high: i64,
        inclusive_high: bool,
    ) -> Result<Vec<String>, HarnessError>;

    /// Removes one matching entry; returns whether anything was removed.
    /// Unique-key stores match on the key alone.
    fn remove(&mut self, key: i64, value: &str) -> Result<bool, HarnessError>;
}

/// Declared per-candidate behavior consulted by validation, so the harness
/// never special-cases candidates by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoreCapabilities {
    /// Inserting an existing key overwrites instead of accumulating.
    pub keys_are_unique: bool,
    /// Native convention for the upper range bound.
    pub range_upper_inclusive: bool,
}

impl StoreCapabilities {
    pub fn multimap() -> Self {
        StoreCapabilities {
            keys_are_unique: false,
            range_upper_inclusive: true,
        }
    }
}

pub type StoreFactory = Rc<dyn Fn() -> Result<Box<dyn OrderedStore>, HarnessError>>;

/// One implementation under comparison. The candidate set is fixed for the
/// lifetime of a run; descriptor order drives display order only.
#[derive(Clone)]
pub struct CandidateDescriptor {
    pub name: String,
    pub caps: StoreCapabilities,
    factory: StoreFactory,
}

impl CandidateDescriptor {
    pub fn new<N: Into<String>>(name: N, caps: StoreCapabilities, factory: StoreFactory) -> Self {
        CandidateDescriptor {
            name: name.into(),
            caps,
            factory,
        }
    }

    /// A fresh, empty store instance. Exclusively owned by one candidate
    /// within one suite; never shared.
    pub fn fresh_store(&self) -> Result<Box<dyn OrderedStore>, HarnessError> {
        (self.factory)()
    }
}

impl std::fmt::Debug for CandidateDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateDescriptor")
            .field("name", &self.name)
            .field("caps", &self.caps)
            .finish_non_exhaustive()
    }
}
