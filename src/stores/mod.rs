pub mod btree;
pub mod scan_vec;
pub mod sorted_vec;
pub mod sqlite;

use std::rc::Rc;

use crate::store::{CandidateDescriptor, OrderedStore, StoreCapabilities};

pub use btree::BTreeStore;
pub use scan_vec::ScanVecStore;
pub use sorted_vec::SortedVecStore;
pub use sqlite::SqliteStore;

/// The default candidate set, in display order.
pub fn default_candidates() -> Vec<CandidateDescriptor> {
    vec![
        CandidateDescriptor::new(
            "btree",
            StoreCapabilities::multimap(),
            Rc::new(|| Ok(Box::new(BTreeStore::new()) as Box<dyn OrderedStore>)),
        ),
        CandidateDescriptor::new(
            "sqlite",
            StoreCapabilities {
                keys_are_unique: false,
                range_upper_inclusive: false,
            },
            Rc::new(|| Ok(Box::new(SqliteStore::open_in_memory()?) as Box<dyn OrderedStore>)),
        ),
        CandidateDescriptor::new(
            "sorted-vec (u)",
            StoreCapabilities {
                keys_are_unique: true,
                range_upper_inclusive: true,
            },
            Rc::new(|| Ok(Box::new(SortedVecStore::new()) as Box<dyn OrderedStore>)),
        ),
        CandidateDescriptor::new(
            "scan-vec",
            StoreCapabilities::multimap(),
            Rc::new(|| Ok(Box::new(ScanVecStore::new()) as Box<dyn OrderedStore>)),
        ),
    ]
}
