//! Configuration entry point for building caches from user-supplied settings.
//!
//! Capacity arrives as a plain `usize` (parsed from input, read from config)
//! and is validated exactly once, in [`CacheBuilder::try_build`].
//!
//! ## Example
//!
//! ```rust
//! use lrukit::builder::CacheBuilder;
//!
//! let mut cache = CacheBuilder::new(100)
//!     .preallocate(true)
//!     .try_build::<u64, String>()
//!     .unwrap();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//!
//! assert!(CacheBuilder::new(0).try_build::<u64, String>().is_err());
//! ```

use std::hash::Hash;
use std::num::NonZeroUsize;

use crate::error::ConfigError;
use crate::policy::lru::LruCache;

/// Builder for [`LruCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheBuilder {
    capacity: usize,
    preallocate: bool,
}

impl CacheBuilder {
    /// Starts a builder for a cache of `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            preallocate: false,
        }
    }

    /// Reserve storage for the full capacity at build time instead of
    /// growing on demand.
    pub fn preallocate(mut self, enabled: bool) -> Self {
        self.preallocate = enabled;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Validates the configuration and builds the cache.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidCapacity`] when the capacity is zero.
    pub fn try_build<K, V>(self) -> Result<LruCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        let capacity = NonZeroUsize::new(self.capacity).ok_or(ConfigError::InvalidCapacity {
            requested: self.capacity,
        })?;
        Ok(if self.preallocate {
            LruCache::with_preallocation(capacity)
        } else {
            LruCache::new(capacity)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_requested_capacity() {
        let cache = CacheBuilder::new(8).try_build::<u32, u32>().unwrap();
        assert_eq!(cache.capacity(), 8);
        assert!(cache.is_empty());
    }

    #[test]
    fn preallocated_cache_behaves_the_same() {
        let mut cache = CacheBuilder::new(2)
            .preallocate(true)
            .try_build::<&str, i32>()
            .unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.put("c", 3), Some(("a", 1)));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn zero_capacity_fails() {
        let err = CacheBuilder::new(0).try_build::<u32, u32>().unwrap_err();
        assert_eq!(err, ConfigError::InvalidCapacity { requested: 0 });
    }

    #[test]
    fn builder_is_reusable() {
        let builder = CacheBuilder::new(4).preallocate(true);
        let a = builder.try_build::<u8, u8>().unwrap();
        let b = builder.try_build::<u16, u16>().unwrap();
        assert_eq!(a.capacity(), b.capacity());
        assert_eq!(builder.capacity(), 4);
    }
}
