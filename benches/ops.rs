//! Micro and workload benchmarks for the cache primitives.
//!
//! Run with: `cargo bench --bench ops`

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use memokit::fib::Fibonacci;
use memokit::policy::lru::LruCache;
use memokit::policy::splay::SplayCache;
use memokit::range_sum::RangeSumCache;
use memokit::traits::{CoreCache, OrderedCache};

fn bench_lru_insert_get(c: &mut Criterion) {
    c.bench_function("lru_insert_get", |b| {
        b.iter_batched(
            || {
                let mut cache = LruCache::new(1024);
                for i in 0..1024u64 {
                    cache.insert(i, i);
                }
                cache
            },
            |mut cache| {
                for i in 0..1024u64 {
                    cache.insert(std::hint::black_box(i + 10_000), i);
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_splay_search_hotset(c: &mut Criterion) {
    c.bench_function("splay_search_hotset", |b| {
        b.iter_batched(
            || {
                let mut cache: SplayCache<u64, u64> = SplayCache::new();
                let mut rng = StdRng::seed_from_u64(3);
                for _ in 0..4096 {
                    let k = rng.gen_range(0..1_000_000);
                    cache.insert(k, k);
                }
                // Hot keys the measured loop hammers
                for k in 0..16u64 {
                    cache.insert(k, k);
                }
                cache
            },
            |mut cache| {
                for i in 0..1024u64 {
                    let _ = std::hint::black_box(cache.search(&std::hint::black_box(i % 16)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_fib_strategies(c: &mut Criterion) {
    c.bench_function("fib_90_lru_cold", |b| {
        b.iter_batched(
            Fibonacci::unbounded,
            |mut fib| std::hint::black_box(fib.value(std::hint::black_box(90))),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("fib_90_splay_cold", |b| {
        b.iter_batched(
            Fibonacci::splayed,
            |mut fib| std::hint::black_box(fib.value(std::hint::black_box(90))),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("fib_150_iterative_cold", |b| {
        b.iter_batched(
            Fibonacci::unbounded,
            |mut fib| std::hint::black_box(fib.value_iterative(std::hint::black_box(150))),
            BatchSize::SmallInput,
        )
    });
}

const WORKLOAD_N: usize = 10_000;
const WORKLOAD_Q: usize = 20_000;

enum Query {
    Range(usize, usize),
    Update(usize, i64),
}

/// 80% range queries (70% of those from a small popular set), 20% updates.
fn workload(rng: &mut StdRng) -> Vec<Query> {
    let popular: Vec<(usize, usize)> = (0..10)
        .map(|_| {
            let low = rng.gen_range(0..WORKLOAD_N);
            let high = rng.gen_range(low..WORKLOAD_N);
            (low, high)
        })
        .collect();

    (0..WORKLOAD_Q)
        .map(|_| {
            if rng.gen_bool(0.8) {
                let (low, high) = if rng.gen_bool(0.7) {
                    popular[rng.gen_range(0..popular.len())]
                } else {
                    let low = rng.gen_range(0..WORKLOAD_N);
                    let high = rng.gen_range(low..WORKLOAD_N);
                    (low, high)
                };
                Query::Range(low, high)
            } else {
                Query::Update(rng.gen_range(0..WORKLOAD_N), rng.gen_range(1..=2000))
            }
        })
        .collect()
}

fn run_workload(system: &mut RangeSumCache, queries: &[Query], cached: bool) {
    for query in queries {
        match *query {
            Query::Range(low, high) => {
                let sum = if cached {
                    system.range_sum(low, high)
                } else {
                    system.range_sum_uncached(low, high)
                };
                let _ = std::hint::black_box(sum);
            }
            Query::Update(index, value) => {
                let result = if cached {
                    system.update(index, value)
                } else {
                    system.update_uncached(index, value)
                };
                let _ = std::hint::black_box(result);
            }
        }
    }
}

fn bench_range_sum_workload(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let data: Vec<i64> = (0..WORKLOAD_N).map(|_| rng.gen_range(1..=1000)).collect();
    let queries = workload(&mut rng);

    let mut group = c.benchmark_group("range_sum_workload");
    group.sample_size(10);

    group.bench_function("uncached", |b| {
        b.iter_batched(
            || {
                let mut system = RangeSumCache::new(WORKLOAD_N, 0);
                system.load(data.clone()).expect("sized to match");
                system
            },
            |mut system| run_workload(&mut system, &queries, false),
            BatchSize::LargeInput,
        )
    });

    group.bench_function("lru_cached", |b| {
        b.iter_batched(
            || {
                let mut system = RangeSumCache::new(WORKLOAD_N, 1000);
                system.load(data.clone()).expect("sized to match");
                system
            },
            |mut system| run_workload(&mut system, &queries, true),
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_lru_insert_get,
    bench_splay_search_hotset,
    bench_fib_strategies,
    bench_range_sum_workload
);
criterion_main!(benches);
