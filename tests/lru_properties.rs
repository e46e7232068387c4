// ==============================================
// LRU MODEL-BASED PROPERTY TESTS
// ==============================================
//
// Random operation sequences are applied to both `LruCache` and a naive
// MRU-first `Vec` model. After every step the two must agree on the returned
// values, the evicted entry and the full recency order.

use lrukit::policy::lru::LruCache;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Put(u8, u16),
    Get(u8),
    Peek(u8),
    Touch(u8),
    Remove(u8),
    PopLru,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    // Small key space so hits, updates and evictions all happen often.
    let key = 0u8..12;
    prop_oneof![
        4 => (key.clone(), any::<u16>()).prop_map(|(k, v)| Op::Put(k, v)),
        3 => key.clone().prop_map(Op::Get),
        1 => key.clone().prop_map(Op::Peek),
        1 => key.clone().prop_map(Op::Touch),
        1 => key.prop_map(Op::Remove),
        1 => Just(Op::PopLru),
    ]
}

/// Reference LRU: front of the vec is MRU, linear scans everywhere.
struct Model {
    capacity: usize,
    entries: Vec<(u8, u16)>,
}

impl Model {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::new(),
        }
    }

    fn position(&self, key: u8) -> Option<usize> {
        self.entries.iter().position(|(k, _)| *k == key)
    }

    fn promote(&mut self, at: usize) {
        let entry = self.entries.remove(at);
        self.entries.insert(0, entry);
    }

    fn put(&mut self, key: u8, value: u16) -> Option<(u8, u16)> {
        if let Some(at) = self.position(key) {
            self.entries[at].1 = value;
            self.promote(at);
            return None;
        }
        self.entries.insert(0, (key, value));
        if self.entries.len() > self.capacity {
            return self.entries.pop();
        }
        None
    }

    fn get(&mut self, key: u8) -> Option<u16> {
        let at = self.position(key)?;
        self.promote(at);
        Some(self.entries[0].1)
    }

    fn peek(&self, key: u8) -> Option<u16> {
        self.position(key).map(|at| self.entries[at].1)
    }

    fn touch(&mut self, key: u8) -> bool {
        match self.position(key) {
            Some(at) => {
                self.promote(at);
                true
            },
            None => false,
        }
    }

    fn remove(&mut self, key: u8) -> Option<u16> {
        let at = self.position(key)?;
        Some(self.entries.remove(at).1)
    }

    fn pop_lru(&mut self) -> Option<(u8, u16)> {
        self.entries.pop()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn matches_reference_model(
        capacity in 1usize..8,
        ops in prop::collection::vec(op_strategy(), 0..200),
    ) {
        let mut cache = LruCache::try_new(capacity).unwrap();
        let mut model = Model::new(capacity);

        for op in ops {
            match op {
                Op::Put(k, v) => {
                    prop_assert_eq!(cache.put(k, v), model.put(k, v));
                },
                Op::Get(k) => {
                    prop_assert_eq!(cache.get(&k).copied(), model.get(k));
                },
                Op::Peek(k) => {
                    prop_assert_eq!(cache.peek(&k).copied(), model.peek(k));
                },
                Op::Touch(k) => {
                    prop_assert_eq!(cache.touch(&k), model.touch(k));
                },
                Op::Remove(k) => {
                    prop_assert_eq!(cache.remove(&k), model.remove(k));
                },
                Op::PopLru => {
                    prop_assert_eq!(cache.pop_lru(), model.pop_lru());
                },
            }

            prop_assert_eq!(cache.entries(), model.entries.clone());
            prop_assert!(cache.check_invariants().is_ok());
        }
    }

    #[test]
    fn size_never_exceeds_capacity(
        capacity in 1usize..16,
        keys in prop::collection::vec(any::<u16>(), 0..300),
    ) {
        let mut cache = LruCache::try_new(capacity).unwrap();
        for key in keys {
            cache.put(key, ());
            prop_assert!(cache.len() <= capacity);
        }
    }

    #[test]
    fn accessed_key_becomes_front(
        capacity in 1usize..10,
        keys in prop::collection::vec(0u8..20, 1..100),
        probe in 0u8..20,
    ) {
        let mut cache = LruCache::try_new(capacity).unwrap();
        for key in &keys {
            cache.put(*key, *key as u32);
            prop_assert_eq!(cache.peek_mru().map(|(k, _)| *k), Some(*key));
        }
        if cache.get(&probe).is_some() {
            prop_assert_eq!(cache.peek_mru().map(|(k, _)| *k), Some(probe));
        }
    }

    #[test]
    fn eviction_takes_previous_lru(
        capacity in 1usize..8,
        keys in prop::collection::vec(0u8..32, 0..150),
    ) {
        let mut cache = LruCache::try_new(capacity).unwrap();
        for key in keys {
            let lru_before = cache.peek_lru().map(|(k, v)| (*k, *v));
            let is_new = !cache.contains(&key);
            let full = cache.len() == capacity;

            let evicted = cache.put(key, u16::from(key));
            if is_new && full {
                prop_assert_eq!(evicted, lru_before);
            } else {
                prop_assert_eq!(evicted, None);
            }
        }
    }

    #[test]
    fn enumerated_keys_are_exactly_the_found_keys(
        capacity in 1usize..8,
        keys in prop::collection::vec(0u8..16, 0..80),
    ) {
        let mut cache = LruCache::try_new(capacity).unwrap();
        for key in keys {
            cache.put(key, ());
        }

        let mut listed: Vec<u8> = cache.keys().copied().collect();
        listed.sort_unstable();
        let mut found: Vec<u8> = (0u8..16).filter(|k| cache.peek(k).is_some()).collect();
        found.sort_unstable();
        prop_assert_eq!(listed, found);
    }

    #[test]
    fn repeated_get_is_stable(
        capacity in 1usize..8,
        keys in prop::collection::vec(0u8..10, 1..40),
        probe in 0u8..10,
    ) {
        let mut cache = LruCache::try_new(capacity).unwrap();
        for key in keys {
            cache.put(key, u32::from(key) * 3);
        }
        let len = cache.len();
        let first = cache.get(&probe).copied();
        let second = cache.get(&probe).copied();
        prop_assert_eq!(first, second);
        prop_assert_eq!(cache.len(), len);
    }
}
