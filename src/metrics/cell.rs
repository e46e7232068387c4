use std::cell::Cell;

/// Counter bumped from `&self` read paths (`peek_lru`, `recency_rank`).
///
/// Not `Sync`: a cache that records metrics can still move between threads,
/// but shared access must go through the owner's lock.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.add(1);
    }

    #[inline]
    pub fn add(&self, n: u64) {
        self.0.set(self.0.get().saturating_add(n));
    }

    #[inline]
    pub fn reset(&self) {
        self.0.set(0);
    }
}
