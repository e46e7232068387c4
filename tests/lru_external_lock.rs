// ==============================================
// EXTERNALLY SERIALIZED ACCESS
// ==============================================
//
// `LruCache` has no internal locking. These tests share one instance across
// threads behind a single `parking_lot::Mutex` held by the owner.

use std::sync::Arc;
use std::thread;

use lrukit::policy::lru::LruCache;
use parking_lot::Mutex;

#[test]
fn mutex_wrapped_cache_keeps_bound_under_threads() {
    let capacity = 64;
    let cache = Arc::new(Mutex::new(LruCache::<u64, u64>::try_new(capacity).unwrap()));

    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..2_000u64 {
                    let key = (t * 1_000 + i) % 200;
                    let mut guard = cache.lock();
                    if guard.get(&key).is_none() {
                        guard.put(key, i);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let guard = cache.lock();
    assert!(guard.len() <= capacity);
    guard.check_invariants().unwrap();
}

#[test]
fn evictions_are_observed_by_exactly_one_writer() {
    let cache = Arc::new(Mutex::new(LruCache::<u32, u32>::try_new(8).unwrap()));

    let handles: Vec<_> = (0..4u32)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                let mut evicted = Vec::new();
                for i in 0..100u32 {
                    if let Some((key, _)) = cache.lock().put(t * 100 + i, i) {
                        evicted.push(key);
                    }
                }
                evicted
            })
        })
        .collect();

    let mut all: Vec<u32> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    let total = all.len();
    all.sort_unstable();
    all.dedup();

    // 400 distinct keys through 8 slots: everything but the survivors left once.
    assert_eq!(total, all.len());
    assert_eq!(total, 400 - 8);
    assert_eq!(cache.lock().len(), 8);
}
