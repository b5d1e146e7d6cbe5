use ordbench::dataset::{Dataset, DatasetSize, Record};

fn rec(key: i64, value: &str) -> Record {
    Record {
        key,
        value: value.to_string(),
    }
}

#[test]
fn test_size_enumeration_is_closed() {
    let counts: Vec<usize> = DatasetSize::ALL
        .into_iter()
        .map(DatasetSize::record_count)
        .collect();
    assert_eq!(counts, vec![1, 100, 500, 2000]);
    assert_eq!(
        DatasetSize::from_count(2000).unwrap(),
        DatasetSize::Large
    );
    assert!(DatasetSize::from_count(7).is_err());
    assert!(DatasetSize::from_count(0).is_err());
}

#[test]
fn test_generation_is_deterministic_per_seed() {
    let a = Dataset::generate(DatasetSize::Medium, 42);
    let b = Dataset::generate(DatasetSize::Medium, 42);
    assert_eq!(a.records(), b.records());

    let c = Dataset::generate(DatasetSize::Medium, 43);
    assert_ne!(a.records(), c.records());
}

#[test]
fn test_generated_keys_stay_in_age_range() {
    let dataset = Dataset::generate(DatasetSize::Large, 7);
    assert_eq!(dataset.len(), 2000);
    assert!(dataset.records().iter().all(|r| (0..=90).contains(&r.key)));
    assert!(dataset.records().iter().all(|r| !r.value.is_empty()));
}

#[test]
fn test_stats_on_known_records() {
    let dataset = Dataset::from_records(vec![
        rec(5, "Bob"),
        rec(1, "Zed"),
        rec(9, "Al"),
        rec(5, "Cy"),
    ]);
    let stats = dataset.stats().unwrap();
    assert_eq!(stats.min_key, 1);
    assert_eq!(stats.max_key, 9);
    assert_eq!(stats.min_value, "Al");
    assert_eq!(stats.max_value, "Zed");
    assert_eq!(stats.distinct_keys, 3);
}

#[test]
fn test_stats_reject_empty_dataset() {
    let dataset = Dataset::from_records(Vec::new());
    assert!(dataset.stats().is_err());
}

#[test]
fn test_sorted_unique_keys() {
    let dataset = Dataset::from_records(vec![
        rec(9, "a"),
        rec(1, "b"),
        rec(9, "c"),
        rec(4, "d"),
    ]);
    assert_eq!(dataset.sorted_unique_keys(), vec![1, 4, 9]);
}
