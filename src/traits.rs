//! # Cache Trait Hierarchy
//!
//! This module defines the trait hierarchy for the cache subsystem, providing
//! a unified interface over the two cache families in this crate while keeping
//! each family's operation set policy-appropriate.
//!
//! ## Architecture
//!
//! ```text
//!            ┌─────────────────────────────────┐   ┌──────────────────────────────┐
//!            │        CoreCache<K, V>          │   │      OrderedCache<K, V>      │
//!            │                                 │   │         (K: Ord)             │
//!            │  insert(&mut, K, V) → Option<V> │   │                              │
//!            │  get(&mut, &K) → Option<&V>     │   │  insert(&mut, K, V)          │
//!            │  contains(&, &K) → bool         │   │  search(&mut, &K) → Option   │
//!            │  len / is_empty / capacity      │   │  len / is_empty              │
//!            │  clear(&mut)                    │   │  clear(&mut)                 │
//!            └───────────────┬─────────────────┘   └──────────────────────────────┘
//!                            │                       keyed by total order; access
//!                            ▼                       reshapes internal structure
//!            ┌─────────────────────────────────┐
//!            │       MutableCache<K, V>        │
//!            │                                 │
//!            │  remove(&K) → Option<V>         │
//!            └───────────────┬─────────────────┘
//!                            │
//!                            ▼
//!            ┌─────────────────────────────────┐
//!            │       LruCacheTrait<K, V>       │
//!            │                                 │
//!            │  pop_lru() → (K, V)             │
//!            │  peek_lru() → (&K, &V)          │
//!            │  touch(&K) → bool               │
//!            │  recency_rank(&K) → usize       │
//!            └─────────────────────────────────┘
//! ```
//!
//! ## Design Notes
//!
//! `CoreCache` models bounded, hash-addressed caches: capacity is part of the
//! contract and `get` may reorder eviction state. `OrderedCache` models the
//! splay tree: keys need only a total order, there is no capacity, and both
//! `insert` and a successful `search` restructure the tree (hence `&mut` on
//! `search`). The two hierarchies are deliberately disjoint — a splay tree has
//! no meaningful `capacity()` and a hash-addressed LRU has no key order.

/// Core operations for bounded, hash-addressed caches.
///
/// # Example
///
/// ```
/// use memokit::policy::lru::LruCache;
/// use memokit::traits::CoreCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// If the cache is at capacity, an entry is evicted according to the
    /// cache's eviction policy before the new entry is inserted. A cache
    /// with capacity 0 never retains new keys.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// May update internal eviction state (e.g. recency order). Use
    /// [`contains`](Self::contains) to check existence without side effects.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries in the cache.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum capacity of the cache.
    fn capacity(&self) -> usize;

    /// Removes all entries from the cache. Capacity is unchanged.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// # Example
///
/// ```
/// use memokit::policy::lru::LruCache;
/// use memokit::traits::{CoreCache, MutableCache};
///
/// let mut cache = LruCache::new(10);
/// cache.insert(1, "one");
/// assert_eq!(cache.remove(&1), Some("one"));
/// assert_eq!(cache.remove(&1), None);
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a specific key-value pair.
    ///
    /// Returns the removed value if the key existed, or `None` if it didn't.
    fn remove(&mut self, key: &K) -> Option<V>;
}

/// LRU-specific operations that respect access order.
///
/// Entries are ordered by recency — the least recently accessed entry is
/// evicted first.
///
/// # Example
///
/// ```
/// use memokit::policy::lru::LruCache;
/// use memokit::traits::{CoreCache, LruCacheTrait};
///
/// let mut cache: LruCache<u64, &str> = LruCache::new(3);
/// cache.insert(1, "first");
/// cache.insert(2, "second");
/// cache.insert(3, "third");
///
/// // Access key 1 to make it MRU; key 2 is now LRU
/// cache.get(&1);
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
///
/// // Touch without retrieving the value
/// assert!(cache.touch(&2));
/// let (key, _) = cache.pop_lru().unwrap();
/// assert_eq!(key, 3);
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    ///
    /// Returns `None` if the cache is empty.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Peeks at the LRU entry without removing it or updating access order.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks an entry as recently used without retrieving the value.
    ///
    /// Returns `true` if the key was found and touched, `false` otherwise.
    fn touch(&mut self, key: &K) -> bool;

    /// Gets the recency rank of a key (0 = most recent, higher = less recent).
    ///
    /// O(n) scan; intended for tests and diagnostics. Returns `None` if the
    /// key is not found.
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Ordered caches over totally-ordered keys.
///
/// Implemented by the splay tree: `insert` and a successful `search` both
/// restructure the tree to move the accessed key to the root, so `search`
/// takes `&mut self`. An unsuccessful `search` leaves the structure
/// untouched.
///
/// # Example
///
/// ```
/// use memokit::policy::splay::SplayCache;
/// use memokit::traits::OrderedCache;
///
/// let mut cache: SplayCache<u64, &str> = SplayCache::new();
/// cache.insert(10, "ten");
/// cache.insert(5, "five");
///
/// assert_eq!(cache.search(&10), Some(&"ten"));
/// assert_eq!(cache.search(&99), None);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait OrderedCache<K: Ord, V> {
    /// Inserts a key-value pair and moves a node with that key to the root.
    ///
    /// Duplicate keys are retained but shadowed: lookups stop at the first
    /// equal key on the descent path.
    fn insert(&mut self, key: K, value: V);

    /// Searches for a key; a hit restructures the cache around it.
    ///
    /// Returns `None` on a miss, with no structural side effects.
    fn search(&mut self, key: &K) -> Option<&V>;

    /// Returns the number of stored nodes (including shadowed duplicates).
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all entries from the cache.
    fn clear(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mock implementation for testing trait design
    struct MockCache {
        data: Vec<(i32, String)>,
        capacity: usize,
    }

    impl CoreCache<i32, String> for MockCache {
        fn insert(&mut self, key: i32, value: String) -> Option<String> {
            if let Some((_, existing)) = self.data.iter_mut().find(|(k, _)| *k == key) {
                return Some(std::mem::replace(existing, value));
            }
            if self.data.len() >= self.capacity {
                self.data.remove(0);
            }
            self.data.push((key, value));
            None
        }

        fn get(&mut self, key: &i32) -> Option<&String> {
            self.data.iter().find(|(k, _)| k == key).map(|(_, v)| v)
        }

        fn contains(&self, key: &i32) -> bool {
            self.data.iter().any(|(k, _)| k == key)
        }

        fn len(&self) -> usize {
            self.data.len()
        }

        fn capacity(&self) -> usize {
            self.capacity
        }

        fn clear(&mut self) {
            self.data.clear();
        }
    }

    #[test]
    fn insert_returns_previous_value() {
        let mut cache = MockCache {
            data: Vec::new(),
            capacity: 2,
        };

        assert_eq!(cache.insert(1, "first".to_string()), None);
        assert_eq!(
            cache.insert(1, "second".to_string()),
            Some("first".to_string())
        );
        assert_eq!(cache.get(&1), Some(&"second".to_string()));
    }

    #[test]
    fn is_empty_default_tracks_len() {
        let mut cache = MockCache {
            data: Vec::new(),
            capacity: 2,
        };
        assert!(cache.is_empty());
        cache.insert(1, "one".to_string());
        assert!(!cache.is_empty());
    }
}
