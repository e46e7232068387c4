//! DHAT heap profiler for lrukit.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>
//!
//! Steady-state `get` should not allocate at all; `put` of a new key should
//! only allocate while the index and arena are still growing toward capacity.

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use lrukit::builder::CacheBuilder;
use lrukit::policy::lru::LruCache;
use lrukit::traits::CoreCache;

/// Simple XorShift64 RNG for deterministic workloads.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (u64::MAX as f64);
        (self.next_u64() as f64) * SCALE
    }
}

/// 90% of accesses hit 10% of keys; misses are filled in.
fn hotset_workload<C: CoreCache<u64, u64>>(cache: &mut C, operations: usize, universe: u64, seed: u64) {
    let mut rng = XorShift64::new(seed);
    let hot_size = (universe / 10).max(1);

    for _ in 0..operations {
        let key = if rng.next_f64() < 0.9 {
            rng.next_u64() % hot_size
        } else {
            hot_size + (rng.next_u64() % (universe - hot_size))
        };

        if cache.get(&key).is_none() {
            let _ = cache.insert(key, key);
        }
    }
}

/// Sequential sweep over the whole universe.
fn scan_workload<C: CoreCache<u64, u64>>(cache: &mut C, operations: usize, universe: u64) {
    for i in 0..operations {
        let key = (i as u64) % universe;
        if cache.get(&key).is_none() {
            let _ = cache.insert(key, key);
        }
    }
}

/// Every insert is a new key, so every insert evicts once full.
fn eviction_churn(cache: &mut LruCache<u64, u64>, operations: usize) -> usize {
    let base = 1_000_000u64;
    (0..operations as u64)
        .filter(|i| cache.put(base + i, *i).is_some())
        .count()
}

fn profile(label: &str, preallocate: bool) {
    println!("=== Profiling LRU ({}) ===", label);
    let capacity = 4096;
    let operations = 100_000;
    let universe = 16_384;

    let mut cache = match CacheBuilder::new(capacity)
        .preallocate(preallocate)
        .try_build::<u64, u64>()
    {
        Ok(cache) => cache,
        Err(err) => {
            eprintln!("  skipped: {}", err);
            return;
        },
    };

    for i in 0..capacity as u64 {
        cache.put(i, i);
    }

    hotset_workload(&mut cache, operations, universe, 42);
    scan_workload(&mut cache, operations / 2, universe);
    let evicted = eviction_churn(&mut cache, operations / 4);

    println!("  Evicted during churn: {}", evicted);
    println!("  Final size: {}", cache.len());
}

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    println!("lrukit DHAT Heap Profiling");
    println!("==========================\n");

    profile("grow on demand", false);
    profile("preallocated", true);

    println!("\n==========================");
    println!("Profiling complete!");
    println!(
        "View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>"
    );
}
