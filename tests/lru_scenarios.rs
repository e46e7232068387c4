// ==============================================
// LRU SCENARIO TESTS (integration)
// ==============================================
//
// End-to-end walks through the public API: construction, put/get, eviction
// and enumeration, checked through the crate root like a consumer would.

use lrukit::prelude::*;

fn order(cache: &LruCache<&'static str, i32>) -> Vec<(&'static str, i32)> {
    cache.iter().map(|(k, v)| (*k, *v)).collect()
}

fn build(capacity: usize) -> LruCache<&'static str, i32> {
    LruCache::try_new(capacity).expect("capacity is positive")
}

// ==============================================
// Worked scenarios
// ==============================================

#[test]
fn overflow_evicts_oldest_insert() {
    let mut cache = build(2);
    assert_eq!(cache.put("a", 1), None);
    assert_eq!(cache.put("b", 2), None);

    let evicted = cache.put("c", 3);
    assert_eq!(evicted, Some(("a", 1)));
    assert_eq!(order(&cache), vec![("c", 3), ("b", 2)]);
}

#[test]
fn get_promotes_to_front() {
    let mut cache = build(2);
    cache.put("a", 1);
    cache.put("b", 2);

    assert_eq!(cache.get("a"), Some(&1));
    assert_eq!(order(&cache), vec![("a", 1), ("b", 2)]);
}

#[test]
fn update_in_place_never_evicts() {
    let mut cache = build(1);
    assert_eq!(cache.put("a", 1), None);
    assert_eq!(cache.put("a", 2), None);
    assert_eq!(cache.get("a"), Some(&2));
    assert_eq!(cache.len(), 1);
}

#[test]
fn miss_on_empty_cache() {
    let mut cache = build(3);
    assert_eq!(cache.get("missing"), None);
    assert_eq!(cache.iter().count(), 0);
    assert!(cache.entries().is_empty());
}

#[test]
fn zero_capacity_is_invalid() {
    let err = LruCache::<&str, i32>::try_new(0).unwrap_err();
    assert_eq!(err, ConfigError::InvalidCapacity { requested: 0 });
    assert_eq!(err.to_string(), "capacity must be > 0 (got 0)");

    let via_builder = CacheBuilder::new(0).try_build::<&str, i32>();
    assert!(matches!(
        via_builder,
        Err(ConfigError::InvalidCapacity { requested: 0 })
    ));
}

// ==============================================
// Longer sequences
// ==============================================

#[test]
fn mixed_sequence_tracks_recency() {
    let mut cache = build(3);
    cache.put("a", 1);
    cache.put("b", 2);
    cache.put("c", 3);
    cache.get("a");
    cache.put("b", 20);
    // b a c
    assert_eq!(order(&cache), vec![("b", 20), ("a", 1), ("c", 3)]);

    assert_eq!(cache.put("d", 4), Some(("c", 3)));
    assert_eq!(cache.put("e", 5), Some(("a", 1)));
    assert_eq!(order(&cache), vec![("e", 5), ("d", 4), ("b", 20)]);
    cache.check_invariants().unwrap();
}

#[test]
fn enumeration_does_not_disturb_eviction_order() {
    let mut cache = build(2);
    cache.put("a", 1);
    cache.put("b", 2);

    for _ in 0..3 {
        let _ = cache.entries();
        let _ = cache.iter().count();
        let _ = cache.peek("a");
        let _ = cache.contains("a");
    }

    assert_eq!(cache.put("c", 3), Some(("a", 1)));
}

#[test]
fn remove_frees_room_without_eviction() {
    let mut cache = build(2);
    cache.put("a", 1);
    cache.put("b", 2);
    assert_eq!(cache.remove("b"), Some(2));
    assert_eq!(cache.put("c", 3), None);
    assert_eq!(order(&cache), vec![("c", 3), ("a", 1)]);
}

#[test]
fn outcomes_describe_each_step() {
    let mut cache = build(2);
    let lines: Vec<String> = vec![
        cache.put_described("a", 1).to_string(),
        cache.put_described("b", 2).to_string(),
        cache.get_described("a").to_string(),
        cache.put_described("c", 3).to_string(),
        cache.get_described("b").to_string(),
        cache.put_described("a", 9).to_string(),
    ];
    assert_eq!(
        lines,
        vec![
            "PUT (a, 1) -> added as MRU",
            "PUT (b, 2) -> added as MRU",
            "GET (a) -> accessed & moved to MRU",
            "PUT (c, 3) -> cache full, evicted LRU (b)",
            "GET (b) -> not found",
            "PUT (a, 9) -> updated as MRU",
        ]
    );
}

#[test]
fn large_cache_churn_keeps_invariants() {
    let mut cache: LruCache<u32, u32> = LruCache::try_new(128).unwrap();
    for i in 0..10_000u32 {
        cache.put(i % 300, i);
        if i % 7 == 0 {
            cache.get(&(i % 150));
        }
        if i % 97 == 0 {
            cache.remove(&(i % 50));
        }
    }
    assert!(cache.len() <= 128);
    cache.check_invariants().unwrap();
}
