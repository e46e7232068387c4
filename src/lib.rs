//! lrukit: a fixed-capacity least-recently-used cache.
//!
//! [`LruCache`](policy::lru::LruCache) pairs an `FxHashMap` index with an
//! arena-backed doubly linked recency list, so `get` and `put` are O(1) and
//! eviction always removes the least recently used entry.
//!
//! ```
//! use lrukit::prelude::*;
//!
//! let mut cache = LruCache::try_new(2)?;
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get("a");
//! assert_eq!(cache.put("c", 3), Some(("b", 2)));
//! # Ok::<(), ConfigError>(())
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod outcome;
pub mod policy;
pub mod prelude;
pub mod traits;

#[cfg(feature = "metrics")]
pub mod metrics;
