// ==============================================
// CROSS-POLICY INVARIANT TESTS (integration)
// ==============================================
//
// Randomized, seeded model checks that verify library-wide behavioral
// guarantees: the LRU cache against a reference recency model, and the splay
// tree against its structural invariants under arbitrary operation mixes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ==============================================
// LRU vs. reference recency model
// ==============================================

mod lru_model {
    use super::*;
    use std::collections::VecDeque;

    use memokit::policy::lru::LruCache;
    use memokit::traits::{CoreCache, LruCacheTrait};

    /// Reference model: most recently used at the back of the deque.
    struct Model {
        order: VecDeque<u32>,
        capacity: usize,
    }

    impl Model {
        fn touch(&mut self, key: u32) {
            if let Some(pos) = self.order.iter().position(|&k| k == key) {
                self.order.remove(pos);
                self.order.push_back(key);
            }
        }

        fn insert(&mut self, key: u32) {
            if let Some(pos) = self.order.iter().position(|&k| k == key) {
                self.order.remove(pos);
                self.order.push_back(key);
                return;
            }
            if self.capacity == 0 {
                return;
            }
            if self.order.len() >= self.capacity {
                self.order.pop_front();
            }
            self.order.push_back(key);
        }
    }

    #[test]
    fn random_ops_match_reference_model() {
        let mut rng = StdRng::seed_from_u64(42);

        for capacity in [0usize, 1, 2, 7, 32] {
            let mut cache: LruCache<u32, u32> = LruCache::new(capacity);
            let mut model = Model {
                order: VecDeque::new(),
                capacity,
            };

            for step in 0..5_000u32 {
                let key = rng.gen_range(0..48);
                if rng.gen_bool(0.6) {
                    cache.insert(key, step);
                    model.insert(key);
                } else {
                    let hit = cache.get(&key).is_some();
                    assert_eq!(hit, model.order.contains(&key), "capacity {capacity}");
                    if hit {
                        model.touch(key);
                    }
                }

                assert!(cache.len() <= capacity, "capacity invariant violated");
                assert_eq!(cache.len(), model.order.len());
            }

            // Drain both in recency order; they must agree exactly
            while let Some((key, _)) = cache.pop_lru() {
                assert_eq!(model.order.pop_front(), Some(key));
            }
            assert!(model.order.is_empty());
        }
    }

    #[test]
    fn eviction_order_is_exactly_insertion_order_without_access() {
        let mut cache: LruCache<u32, u32> = LruCache::new(3);
        for k in 0..10 {
            cache.insert(k, k);
        }

        // Only the last `capacity` keys survive, oldest-first on drain
        assert_eq!(cache.pop_lru(), Some((7, 7)));
        assert_eq!(cache.pop_lru(), Some((8, 8)));
        assert_eq!(cache.pop_lru(), Some((9, 9)));
        assert_eq!(cache.pop_lru(), None);
    }
}

// ==============================================
// Splay structural invariants
// ==============================================

mod splay_structure {
    use super::*;

    use memokit::policy::splay::SplayCache;
    use memokit::traits::OrderedCache;

    #[test]
    fn random_op_mix_preserves_invariants() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut cache: SplayCache<u32, u32> = SplayCache::new();
        let mut inserted: Vec<u32> = Vec::new();

        for _ in 0..2_000 {
            let key = rng.gen_range(0..512);
            if rng.gen_bool(0.5) && !inserted.contains(&key) {
                cache.insert(key, key);
                inserted.push(key);
                assert_eq!(cache.root_key(), Some(&key));
            } else {
                let expected = inserted.contains(&key);
                let found = cache.search(&key).is_some();
                assert_eq!(found, expected);
                if found {
                    assert_eq!(cache.root_key(), Some(&key));
                }
            }
        }

        cache.check_invariants().unwrap();

        inserted.sort_unstable();
        let in_order: Vec<u32> = cache.iter_in_order().map(|(k, _)| *k).collect();
        assert_eq!(in_order, inserted);
    }

    #[test]
    fn sorted_and_reversed_insert_orders_stay_ordered() {
        for ascending in [true, false] {
            let mut cache: SplayCache<u32, ()> = SplayCache::new();
            let keys: Vec<u32> = if ascending {
                (0..500).collect()
            } else {
                (0..500).rev().collect()
            };
            for &k in &keys {
                cache.insert(k, ());
            }

            cache.check_invariants().unwrap();
            let in_order: Vec<u32> = cache.iter_in_order().map(|(k, _)| *k).collect();
            assert_eq!(in_order, (0..500).collect::<Vec<_>>());
        }
    }

    #[test]
    fn repeated_hot_key_accesses_keep_it_at_the_root() {
        let mut cache: SplayCache<u32, u32> = SplayCache::new();
        for k in 0..64 {
            cache.insert(k, k);
        }

        for _ in 0..100 {
            assert_eq!(cache.search(&17), Some(&17));
            assert_eq!(cache.root_key(), Some(&17));
        }
        cache.check_invariants().unwrap();
    }
}
