#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::policy::lru::LruCache;

// Fuzz arbitrary operation sequences on LruCache
//
// First byte picks the capacity; the rest is consumed in (op, key, value)
// triples covering put, get, peek, touch, remove, pop_lru, clear and
// enumeration. Every step re-checks the capacity bound and the
// index/list agreement.
fuzz_target!(|data: &[u8]| {
    let Some((&cap_byte, rest)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap_byte % 32) + 1;
    let mut cache: LruCache<u8, u8> = match LruCache::try_new(capacity) {
        Ok(cache) => cache,
        Err(_) => return,
    };

    for chunk in rest.chunks_exact(3) {
        let (op, key, value) = (chunk[0] % 8, chunk[1] % 64, chunk[2]);
        match op {
            0 | 1 => {
                let was_present = cache.contains(&key);
                let was_full = cache.len() == capacity;
                let lru = cache.peek_lru().map(|(k, v)| (*k, *v));
                let evicted = cache.put(key, value);

                if !was_present && was_full {
                    assert_eq!(evicted, lru);
                } else {
                    assert!(evicted.is_none());
                }
                assert_eq!(cache.peek_mru(), Some((&key, &value)));
            },
            2 => {
                let peeked = cache.peek(&key).copied();
                assert_eq!(cache.get(&key).copied(), peeked);
                if peeked.is_some() {
                    assert_eq!(cache.recency_rank(&key), Some(0));
                }
            },
            3 => {
                let before = cache.entries();
                let _ = cache.peek(&key);
                assert_eq!(cache.entries(), before);
            },
            4 => {
                if cache.touch(&key) {
                    assert_eq!(cache.peek_mru().map(|(k, _)| *k), Some(key));
                }
            },
            5 => {
                let len = cache.len();
                if cache.remove(&key).is_some() {
                    assert_eq!(cache.len(), len - 1);
                    assert!(!cache.contains(&key));
                }
            },
            6 => {
                let lru = cache.peek_lru().map(|(k, v)| (*k, *v));
                assert_eq!(cache.pop_lru(), lru);
            },
            _ => {
                if value == 0 {
                    cache.clear();
                    assert!(cache.is_empty());
                } else {
                    assert_eq!(cache.iter().len(), cache.len());
                }
            },
        }

        assert!(cache.len() <= capacity);
        if let Err(err) = cache.check_invariants() {
            panic!("invariant violated: {}", err);
        }
    }
});
