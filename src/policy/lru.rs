//! # Least Recently Used (LRU) Cache
//!
//! Fixed-capacity key-value store that evicts the least recently used entry
//! when an insert of a new key would exceed its capacity.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                            LruCache<K, V>                            │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  FxHashMap<K, SlotId>  (index)                               │   │
//!   │   │    "a" ─────────────────────────────────────────┐            │   │
//!   │   │    "b" ───────────────────────────────┐         │            │   │
//!   │   │    "c" ─────────────────────┐         │         │            │   │
//!   │   └─────────────────────────────┼─────────┼─────────┼────────────┘   │
//!   │                                 ▼         ▼         ▼                │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  RecencyList<Entry<K, V>>  (arena-backed, linked by SlotId)  │   │
//!   │   │                                                              │   │
//!   │   │  head ──► [c:3] ◄──► [b:2] ◄──► [a:1] ◄── tail               │   │
//!   │   │           MRU                   LRU                          │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations Flow
//!
//! ```text
//!   put(d, 4) with capacity 3
//!     1. "d" not in index
//!     2. push [d:4] at head
//!     3. len 4 > 3: pop tail [a:1], drop "a" from index, return (a, 1)
//!
//!     head ──► [d:4] ◄──► [c:3] ◄──► [b:2] ◄── tail
//!
//!   get(b)
//!     1. index lookup: O(1)
//!     2. splice [b:2] to head: O(1), no allocation
//!
//!     head ──► [b:2] ◄──► [d:4] ◄──► [c:3] ◄── tail
//! ```
//!
//! ## Methods
//!
//! | Method            | Complexity | Description                              |
//! |-------------------|------------|------------------------------------------|
//! | `new` / `try_new` | O(1)       | Create with capacity >= 1                |
//! | `put(k, v)`       | O(1)*      | Insert or update; returns evicted entry  |
//! | `get(&k)`         | O(1)       | Lookup, moves entry to MRU               |
//! | `peek(&k)`        | O(1)       | Lookup without reordering                |
//! | `touch(&k)`       | O(1)       | Move to MRU without reading              |
//! | `remove(&k)`      | O(1)       | Remove by key                            |
//! | `pop_lru()`       | O(1)       | Remove and return the LRU entry          |
//! | `iter()`          | O(n)       | `(&K, &V)` from MRU to LRU, read-only    |
//! | `entries()`       | O(n)       | Owned snapshot in recency order          |
//! | `recency_rank()`  | O(n)       | Position in recency order (0 = MRU)      |
//!
//! `*` amortized over index growth.
//!
//! ## Invariants
//!
//! - The index and the recency list hold exactly the same keys.
//! - `len() <= capacity()` after every operation.
//! - A successful `get`, `put` or `touch` leaves the key at the MRU end.
//! - A `put` evicts at most one entry, and only the current LRU entry.
//!
//! ## Thread Safety
//!
//! Not internally synchronized. `LruCache` holds no raw pointers, so it is
//! `Send` (and `Sync` without the `metrics` feature) whenever `K` and `V` are;
//! wrap it in a lock to share it.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::num::NonZeroUsize;

use rustc_hash::FxHashMap;

use crate::ds::recency_list::{self, RecencyList};
use crate::ds::slot_arena::SlotId;
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsReset,
    MetricsSnapshotProvider,
};
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Result of writing a key, before it is reduced to what a caller asked for.
#[derive(Debug)]
pub(crate) enum Upsert<K, V> {
    /// Key existed; carries the replaced value.
    Updated(V),
    /// Key was new; carries the entry evicted to make room, if any.
    Inserted(Option<(K, V)>),
}

/// Fixed-capacity LRU cache with O(1) `get` and `put`.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
///
/// let mut cache = LruCache::try_new(2).unwrap();
/// cache.put("a", 1);
/// cache.put("b", 2);
///
/// // "a" becomes MRU, so "b" is evicted next
/// assert_eq!(cache.get(&"a"), Some(&1));
/// assert_eq!(cache.put("c", 3), Some(("b", 2)));
///
/// let order: Vec<_> = cache.iter().map(|(k, v)| (*k, *v)).collect();
/// assert_eq!(order, vec![("c", 3), ("a", 1)]);
/// ```
pub struct LruCache<K, V> {
    index: FxHashMap<K, SlotId>,
    order: RecencyList<Entry<K, V>>,
    capacity: NonZeroUsize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Example
    ///
    /// ```
    /// use std::num::NonZeroUsize;
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u64, String> = LruCache::new(NonZeroUsize::new(100).unwrap());
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            index: FxHashMap::default(),
            order: RecencyList::new(),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    /// Like [`new`](Self::new), but reserves index and node storage for
    /// `capacity` entries (plus the transient overflow slot) up front.
    pub fn with_preallocation(capacity: NonZeroUsize) -> Self {
        let slots = capacity.get().saturating_add(1);
        Self {
            index: FxHashMap::with_capacity_and_hasher(slots, Default::default()),
            order: RecencyList::with_capacity(slots),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    /// Fallible constructor for user-supplied capacities.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidCapacity`] when `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::error::ConfigError;
    /// use lrukit::policy::lru::LruCache;
    ///
    /// assert!(LruCache::<u32, u32>::try_new(1).is_ok());
    /// assert_eq!(
    ///     LruCache::<u32, u32>::try_new(0).unwrap_err(),
    ///     ConfigError::InvalidCapacity { requested: 0 },
    /// );
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(capacity)
            .map(Self::new)
            .ok_or(ConfigError::InvalidCapacity {
                requested: capacity,
            })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Maximum number of entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Returns `true` if `key` is cached. Does not update recency.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Looks up `key` and marks it as most recently used.
    ///
    /// A miss returns `None` and changes nothing.
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.order.move_to_front(id);
        self.order.get(id).map(|entry| &entry.value)
    }

    /// Mutable variant of [`get`](Self::get); also marks the entry as MRU.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.index.get(key)?;
        self.order.move_to_front(id);
        self.order.get_mut(id).map(|entry| &mut entry.value)
    }

    /// Looks up `key` without touching recency order.
    #[inline]
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.index.get(key)?;
        self.order.get(id).map(|entry| &entry.value)
    }

    /// Inserts or updates `key`, leaving it as the most recently used entry.
    ///
    /// Updating an existing key replaces its value and returns `None`: the old
    /// value is discarded, not evicted. Inserting a new key into a full cache
    /// evicts the least recently used entry and returns it.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::try_new(1).unwrap();
    /// assert_eq!(cache.put("a", 1), None);
    /// assert_eq!(cache.put("a", 2), None); // update, no eviction
    /// assert_eq!(cache.put("b", 3), Some(("a", 2)));
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        match self.upsert(key, value) {
            Upsert::Updated(_) => None,
            Upsert::Inserted(evicted) => evicted,
        }
    }

    pub(crate) fn upsert(&mut self, key: K, value: V) -> Upsert<K, V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            self.order.move_to_front(id);
            if let Some(entry) = self.order.get_mut(id) {
                return Upsert::Updated(std::mem::replace(&mut entry.value, value));
            }
            // Index pointed at a dead slot; heal by falling through to insert.
            self.index.remove(&key);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        let id = self.order.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);

        if self.order.len() > self.capacity.get() {
            let evicted = self.detach_lru();
            #[cfg(feature = "metrics")]
            if evicted.is_some() {
                self.metrics.record_evicted_entry();
            }
            return Upsert::Inserted(evicted);
        }
        Upsert::Inserted(None)
    }

    /// Removes `key` and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let id = self.index.remove(key)?;
        let entry = self.order.remove(id)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();

        Some(entry.value)
    }

    /// Moves `key` to the MRU position. Returns `false` if it is not cached.
    pub fn touch<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let Some(&id) = self.index.get(key) else {
            return false;
        };
        self.order.move_to_front(id);

        #[cfg(feature = "metrics")]
        self.metrics.record_touch_found();

        true
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let popped = self.detach_lru();

        #[cfg(feature = "metrics")]
        if popped.is_some() {
            self.metrics.record_pop_lru_found();
        }

        popped
    }

    /// The entry that the next overflowing `put` would evict.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lru_call();

        let entry = self.order.back()?;

        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lru_found();

        Some((&entry.key, &entry.value))
    }

    /// The most recently used entry.
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        self.order.front().map(|entry| (&entry.key, &entry.value))
    }

    /// Position of `key` in recency order, 0 being MRU. Walks the list.
    pub fn recency_rank<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_recency_rank_call();

        let target = *self.index.get(key)?;
        for (rank, id) in self.order.iter_ids().enumerate() {
            #[cfg(feature = "metrics")]
            self.metrics.record_recency_rank_scan_step();

            if id == target {
                #[cfg(feature = "metrics")]
                self.metrics.record_recency_rank_found();
                return Some(rank);
            }
        }
        None
    }

    /// Drops every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.index.clear();
        self.order.clear();
    }

    /// Iterates `(&K, &V)` from most to least recently used.
    ///
    /// Read-only: iterating never changes recency order, and the iterator can
    /// be cloned to restart from the same point.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.order.iter(),
        }
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Owned snapshot of every entry, most recently used first.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::try_new(3).unwrap();
    /// cache.put("x", 1);
    /// cache.put("y", 2);
    /// assert_eq!(cache.entries(), vec![("y", 2), ("x", 1)]);
    /// ```
    pub fn entries(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Checks that the index and recency list describe the same entries and
    /// that the capacity bound holds.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.order.validate()?;

        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index has {} keys, recency list has {} entries",
                self.index.len(),
                self.order.len()
            )));
        }
        if self.order.len() > self.capacity.get() {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.order.len(),
                self.capacity
            )));
        }
        for (key, &id) in &self.index {
            match self.order.get(id) {
                Some(entry) if entry.key == *key => {},
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "index slot {} holds a different key",
                        id.index()
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "index points at free slot {}",
                        id.index()
                    )));
                },
            }
        }
        Ok(())
    }

    fn detach_lru(&mut self) -> Option<(K, V)> {
        let entry = self.order.pop_back()?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot::capture(&self.metrics, self.len(), self.capacity())
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsReset for LruCache<K, V> {
    fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("len", &self.order.len())
            .field(
                "entries",
                &self
                    .order
                    .iter()
                    .map(|entry| (&entry.key, &entry.value))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over cache entries from most to least recently used.
pub struct Iter<'a, K, V> {
    inner: recency_list::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.key, &entry.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Trait seams
// ---------------------------------------------------------------------------

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.upsert(key, value) {
            Upsert::Updated(previous) => Some(previous),
            Upsert::Inserted(_) => None,
        }
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }

    fn capacity(&self) -> usize {
        LruCache::capacity(self)
    }

    fn clear(&mut self) {
        LruCache::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        LruCache::pop_lru(self)
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        LruCache::peek_lru(self)
    }

    fn touch(&mut self, key: &K) -> bool {
        LruCache::touch(self, key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        LruCache::recency_rank(self, key)
    }
}
