use std::num::NonZeroUsize;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use lrukit::policy::lru::LruCache;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CAPACITY: usize = 1024;

fn warm_cache(capacity: usize) -> LruCache<u64, u64> {
    let mut cache = LruCache::new(NonZeroUsize::new(capacity).expect("non-zero capacity"));
    for i in 0..capacity as u64 {
        cache.put(i, i);
    }
    cache
}

fn bench_lru_get_hit(c: &mut Criterion) {
    c.bench_function("lru_get_hit", |b| {
        b.iter_batched(
            || warm_cache(CAPACITY),
            |mut cache| {
                for i in 0..CAPACITY as u64 {
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_put_update(c: &mut Criterion) {
    c.bench_function("lru_put_update", |b| {
        b.iter_batched(
            || warm_cache(CAPACITY),
            |mut cache| {
                for i in 0..CAPACITY as u64 {
                    let _ = std::hint::black_box(cache.put(std::hint::black_box(i), i + 1));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_eviction_churn(c: &mut Criterion) {
    c.bench_function("lru_eviction_churn", |b| {
        b.iter_batched(
            || warm_cache(CAPACITY),
            |mut cache| {
                for i in 0..4096u64 {
                    let _ = std::hint::black_box(cache.put(std::hint::black_box(10_000 + i), i));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_hotset_mixed(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let keys: Vec<u64> = (0..8192)
        .map(|_| {
            if rng.gen_bool(0.9) {
                rng.gen_range(0..CAPACITY as u64 / 2)
            } else {
                rng.gen_range(0..CAPACITY as u64 * 8)
            }
        })
        .collect();

    c.bench_function("lru_hotset_mixed", |b| {
        b.iter_batched(
            || warm_cache(CAPACITY),
            |mut cache| {
                for &key in &keys {
                    if cache.get(&key).is_none() {
                        let _ = std::hint::black_box(cache.put(key, key));
                    }
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_get_scales_flat(c: &mut Criterion) {
    let mut group = c.benchmark_group("lru_get_by_capacity");
    for capacity in [64usize, 4096, 262_144] {
        let mut cache = warm_cache(capacity);
        let probe = capacity as u64 / 2;
        group.bench_function(capacity.to_string(), |b| {
            b.iter(|| std::hint::black_box(cache.get(&std::hint::black_box(probe)).copied()))
        });
    }
    group.finish();
}

fn bench_lru_entries(c: &mut Criterion) {
    let cache = warm_cache(CAPACITY);
    c.bench_function("lru_entries_snapshot", |b| {
        b.iter(|| std::hint::black_box(cache.entries()))
    });
}

criterion_group!(
    benches,
    bench_lru_get_hit,
    bench_lru_put_update,
    bench_lru_eviction_churn,
    bench_lru_hotset_mixed,
    bench_lru_get_scales_flat,
    bench_lru_entries
);
criterion_main!(benches);
