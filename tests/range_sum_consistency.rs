// ==============================================
// RANGE-SUM CACHE TRANSPARENCY (integration)
// ==============================================
//
// Drives a cached system and a cacheless baseline (capacity 0) through the
// same randomized query stream — mostly range queries with a skew toward a
// small popular set, plus point updates — and requires identical answers at
// every step. This is the workload shape the cache exists for.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use memokit::range_sum::RangeSumCache;

const N: usize = 256;
const Q: usize = 5_000;
const CACHE_CAPACITY: usize = 64;

enum Query {
    Range(usize, usize),
    Update(usize, i64),
}

fn generate_queries(rng: &mut StdRng) -> Vec<Query> {
    // A handful of popular ranges most queries land on
    let popular: Vec<(usize, usize)> = (0..10)
        .map(|_| {
            let low = rng.gen_range(0..N);
            let high = rng.gen_range(low..N);
            (low, high)
        })
        .collect();

    (0..Q)
        .map(|_| {
            if rng.gen_bool(0.8) {
                let (low, high) = if rng.gen_bool(0.7) {
                    popular[rng.gen_range(0..popular.len())]
                } else {
                    let low = rng.gen_range(0..N);
                    let high = rng.gen_range(low..N);
                    (low, high)
                };
                Query::Range(low, high)
            } else {
                Query::Update(rng.gen_range(0..N), rng.gen_range(1..=2000))
            }
        })
        .collect()
}

#[test]
fn cached_system_is_transparent_under_interleaved_updates() {
    let mut rng = StdRng::seed_from_u64(1234);
    let data: Vec<i64> = (0..N).map(|_| rng.gen_range(1..=1000)).collect();
    let queries = generate_queries(&mut rng);

    let mut cached = RangeSumCache::new(N, CACHE_CAPACITY);
    let mut baseline = RangeSumCache::new(N, 0);
    cached.load(data.clone()).unwrap();
    baseline.load(data).unwrap();

    for query in &queries {
        match *query {
            Query::Range(low, high) => {
                let with_cache = cached.range_sum(low, high).unwrap();
                let direct = baseline.range_sum_uncached(low, high).unwrap();
                assert_eq!(with_cache, direct, "range [{low}, {high}]");
            }
            Query::Update(index, value) => {
                cached.update(index, value).unwrap();
                baseline.update_uncached(index, value).unwrap();
                // Coarse invalidation: nothing survives a write
                assert_eq!(cached.cached_entries(), 0);
            }
        }
        assert!(cached.cached_entries() <= CACHE_CAPACITY);
    }
}

#[test]
fn previously_cached_ranges_recompute_after_update() {
    let mut system = RangeSumCache::new(8, 16);
    system.load(vec![1, 1, 1, 1, 1, 1, 1, 1]).unwrap();

    assert_eq!(system.range_sum(2, 5).unwrap(), 4);
    assert_eq!(system.cached_entries(), 1);

    // Update outside the cached range still discards it
    system.update(7, 50).unwrap();
    assert_eq!(system.cached_entries(), 0);
    assert_eq!(system.range_sum(2, 5).unwrap(), 4);

    // Update inside the range is reflected immediately
    system.update(3, 10).unwrap();
    assert_eq!(system.range_sum(2, 5).unwrap(), 13);
}
