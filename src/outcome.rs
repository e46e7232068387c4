//! Human-readable descriptions of cache operations.
//!
//! Display layers redraw the cache after every operation and show a one-line
//! explanation of what just happened. [`Outcome`] carries that explanation
//! and [`RecencyRole`] labels each rendered entry as MRU, mid or LRU. Neither
//! affects cache behaviour.
//!
//! ```
//! use lrukit::outcome::{Outcome, RecencyRole};
//! use lrukit::policy::lru::LruCache;
//!
//! let mut cache = LruCache::try_new(2).unwrap();
//! cache.put_described("a", 1);
//! cache.put_described("b", 2);
//! let outcome = cache.put_described("c", 3);
//! assert_eq!(outcome.to_string(), "PUT (c, 3) -> cache full, evicted LRU (a)");
//!
//! let roles: Vec<_> = cache.iter_with_roles().map(|(role, k, _)| (role, *k)).collect();
//! assert_eq!(roles, vec![(RecencyRole::Mru, "c"), (RecencyRole::Lru, "b")]);
//! ```

use std::fmt;
use std::hash::Hash;

use crate::policy::lru::{LruCache, Upsert};

/// What a single operation did to the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<K, V> {
    /// A fresh cache was created.
    Initialized { capacity: usize },
    /// New key stored as MRU without eviction.
    Inserted { key: K, value: V },
    /// Existing key got a new value and became MRU.
    Updated { key: K, value: V },
    /// New key stored as MRU; the previous LRU entry was evicted.
    Evicted {
        key: K,
        value: V,
        evicted_key: K,
        evicted_value: V,
    },
    /// Lookup found the key and promoted it to MRU.
    Hit { key: K, value: V },
    /// Lookup did not find the key.
    Miss { key: K },
}

impl<K, V> Outcome<K, V> {
    /// The key evicted by this operation, if any.
    pub fn evicted_key(&self) -> Option<&K> {
        match self {
            Outcome::Evicted { evicted_key, .. } => Some(evicted_key),
            _ => None,
        }
    }

    pub fn is_miss(&self) -> bool {
        matches!(self, Outcome::Miss { .. })
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Outcome<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Initialized { capacity } => {
                write!(f, "cache initialized with capacity {}", capacity)
            },
            Outcome::Inserted { key, value } => {
                write!(f, "PUT ({}, {}) -> added as MRU", key, value)
            },
            Outcome::Updated { key, value } => {
                write!(f, "PUT ({}, {}) -> updated as MRU", key, value)
            },
            Outcome::Evicted {
                key,
                value,
                evicted_key,
                ..
            } => write!(
                f,
                "PUT ({}, {}) -> cache full, evicted LRU ({})",
                key, value, evicted_key
            ),
            Outcome::Hit { key, .. } => write!(f, "GET ({}) -> accessed & moved to MRU", key),
            Outcome::Miss { key } => write!(f, "GET ({}) -> not found", key),
        }
    }
}

/// Display label for an entry's position in recency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecencyRole {
    Mru,
    Mid,
    Lru,
}

impl RecencyRole {
    /// Role of the entry at `position` (0 = MRU) among `len` entries.
    ///
    /// A lone entry is MRU. Returns `None` when `position` is out of range.
    pub fn at(position: usize, len: usize) -> Option<Self> {
        if position >= len {
            None
        } else if position == 0 {
            Some(RecencyRole::Mru)
        } else if position == len - 1 {
            Some(RecencyRole::Lru)
        } else {
            Some(RecencyRole::Mid)
        }
    }
}

impl fmt::Display for RecencyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecencyRole::Mru => "MRU",
            RecencyRole::Mid => "mid",
            RecencyRole::Lru => "LRU",
        })
    }
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// [`put`](Self::put), reporting whether the key was inserted, updated, or
    /// caused an eviction.
    pub fn put_described(&mut self, key: K, value: V) -> Outcome<K, V>
    where
        V: Clone,
    {
        let shown = (key.clone(), value.clone());
        match self.upsert(key, value) {
            Upsert::Updated(_) => Outcome::Updated {
                key: shown.0,
                value: shown.1,
            },
            Upsert::Inserted(None) => Outcome::Inserted {
                key: shown.0,
                value: shown.1,
            },
            Upsert::Inserted(Some((evicted_key, evicted_value))) => Outcome::Evicted {
                key: shown.0,
                value: shown.1,
                evicted_key,
                evicted_value,
            },
        }
    }

    /// [`get`](Self::get), reporting a hit or a miss.
    pub fn get_described(&mut self, key: K) -> Outcome<K, V>
    where
        V: Clone,
    {
        match self.get(&key).cloned() {
            Some(value) => Outcome::Hit { key, value },
            None => Outcome::Miss { key },
        }
    }

    /// Entries from MRU to LRU, each labelled with its [`RecencyRole`].
    pub fn iter_with_roles(&self) -> impl Iterator<Item = (RecencyRole, &K, &V)> + '_ {
        let len = self.len();
        self.iter()
            .enumerate()
            .filter_map(move |(position, (key, value))| {
                RecencyRole::at(position, len).map(|role| (role, key, value))
            })
    }
}
