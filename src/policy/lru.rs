//! # Least Recently Used (LRU) Cache
//!
//! Bounded key→value store with O(1) amortized operations and strict
//! capacity enforcement via recency-based eviction. This is the bounded
//! primitive backing [`RangeSumCache`](crate::range_sum::RangeSumCache) and
//! the unbounded-memo strategy of [`Fibonacci`](crate::fib::Fibonacci).
//!
//! ## Architecture
//!
//! ```text
//!   ┌────────────────────────────────────────────────────────────────┐
//!   │                        LruCache<K, V>                          │
//!   │                                                                │
//!   │   ┌──────────────────────────────────────────────────────────┐ │
//!   │   │  FxHashMap<K, NonNull<Node>>  (O(1) key lookup)          │ │
//!   │   └───────────────┬─────────────┬─────────────┬──────────────┘ │
//!   │                   │             │             │                │
//!   │                   ▼             ▼             ▼                │
//!   │   head ──►  ┌──────────┐  ┌──────────┐  ┌──────────┐ ◄── tail │
//!   │    (MRU)    │  Node    │◄►│  Node    │◄►│  Node    │    (LRU) │
//!   │             │ key, val │  │ key, val │  │ key, val │          │
//!   │             └──────────┘  └──────────┘  └──────────┘          │
//!   │                                                                │
//!   │   Most Recently Used ─────────────────► Least Recently Used   │
//!   └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Method           | Complexity | Description                               |
//! |------------------|------------|-------------------------------------------|
//! | `new(capacity)`  | O(1)       | Create cache with given capacity          |
//! | `unbounded()`    | O(1)       | Create a never-evicting cache             |
//! | `insert(k, v)`   | O(1)*      | Insert or update, may evict LRU           |
//! | `get(&k)`        | O(1)       | Get value, moves to MRU position          |
//! | `peek(&k)`       | O(1)       | Get value without affecting LRU order     |
//! | `contains(&k)`   | O(1)       | Check if key exists                       |
//! | `remove(&k)`     | O(1)       | Remove entry by key                       |
//! | `pop_lru()`      | O(1)       | Remove and return least recently used     |
//! | `peek_lru()`     | O(1)       | Peek at LRU item without removing         |
//! | `touch(&k)`      | O(1)       | Move to MRU without returning value       |
//! | `recency_rank()` | O(n)       | Get position in recency order (0 = MRU)   |
//! | `clear()`        | O(n)       | Remove all entries, capacity unchanged    |
//!
//! ## Capacity Semantics
//!
//! - `len() <= capacity()` holds after every `insert`.
//! - Inserting a **new** key at capacity evicts exactly one entry — the
//!   current least recently used — before attaching the new one.
//! - Updating an **existing** key never evicts; it overwrites the value and
//!   moves the entry to MRU.
//! - Capacity 0 retains nothing: every insert of a new key is a no-op and
//!   every `get` misses. Callers use this to emulate "no cache".
//!
//! ## Safety
//!
//! Nodes are heap-allocated and tracked via `NonNull` pointers owned by this
//! struct; the map holds the only key→node index and the list holds the only
//! ordering. All nodes are freed through `pop_tail` on drop/clear, and a
//! debug-only `validate_invariants` pass checks map/list agreement after
//! every mutation.

use std::fmt;
use std::hash::Hash;
use std::ptr::NonNull;

use rustc_hash::FxHashMap;

use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Node in the LRU linked list.
///
/// Linked-list pointers first for traversal; the key is needed for map
/// removal during eviction.
#[repr(C)]
struct Node<K, V> {
    prev: Option<NonNull<Node<K, V>>>,
    next: Option<NonNull<Node<K, V>>>,
    key: K,
    value: V,
}

/// Bounded LRU cache using a hash map plus a raw-pointer linked list.
///
/// Keys are `Copy` types (range bounds, recurrence indices) — cheap to copy,
/// owned in the nodes. Values are owned directly and returned by reference.
///
/// Not thread-safe: callers must not share an instance across threads
/// without external synchronization (out of scope for this crate).
pub struct LruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    map: FxHashMap<K, NonNull<Node<K, V>>>,
    head: Option<NonNull<Node<K, V>>>,
    tail: Option<NonNull<Node<K, V>>>,
    capacity: usize,
}

// SAFETY: LruCache can be sent between threads if K and V are Send.
// The raw pointers only reference heap memory owned by the struct.
unsafe impl<K, V> Send for LruCache<K, V>
where
    K: Copy + Eq + Hash + Send,
    V: Send,
{
}

// SAFETY: sharing &LruCache only exposes &K/&V; all mutation goes through
// &mut self.
unsafe impl<K, V> Sync for LruCache<K, V>
where
    K: Copy + Eq + Hash + Sync,
    V: Sync,
{
}

impl<K, V> LruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    /// Creates a new LRU cache with the given capacity.
    ///
    /// A capacity of 0 creates a cache that accepts no items (all inserts of
    /// new keys are no-ops).
    ///
    /// # Example
    /// ```
    /// use memokit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::new(100);
    /// ```
    #[inline]
    pub fn new(capacity: usize) -> Self {
        LruCache {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            head: None,
            tail: None,
            capacity,
        }
    }

    /// Creates a cache that never evicts.
    ///
    /// Equivalent to a bounded cache with `usize::MAX` capacity but without
    /// pre-allocating; the map grows as entries arrive. Backs memoization
    /// state that persists for the lifetime of its owner.
    ///
    /// # Example
    /// ```
    /// use memokit::policy::lru::LruCache;
    /// use memokit::traits::CoreCache;
    ///
    /// let mut memo: LruCache<u64, u128> = LruCache::unbounded();
    /// for n in 0..10_000u64 {
    ///     memo.insert(n, n as u128);
    /// }
    /// assert_eq!(memo.len(), 10_000);
    /// ```
    #[inline]
    pub fn unbounded() -> Self {
        LruCache {
            map: FxHashMap::default(),
            head: None,
            tail: None,
            capacity: usize::MAX,
        }
    }

    /// Read-only lookup without LRU update.
    ///
    /// Unlike [`get`](CoreCache::get), this does not move the item to the
    /// MRU position.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lru::LruCache;
    /// use memokit::traits::CoreCache;
    ///
    /// let mut cache: LruCache<u32, &str> = LruCache::new(2);
    /// cache.insert(1, "first");
    /// cache.insert(2, "second");
    ///
    /// // Peek doesn't refresh key 1, so it is still first in line to evict
    /// assert_eq!(cache.peek(&1), Some(&"first"));
    /// cache.insert(3, "third");
    /// assert!(!cache.contains(&1));
    /// ```
    #[inline]
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.map
            .get(key)
            .map(|node_ptr| unsafe { &(*node_ptr.as_ptr()).value })
    }

    /// Detach a node from the linked list without removing it from the map.
    #[inline(always)]
    fn detach(&mut self, node_ptr: NonNull<Node<K, V>>) {
        unsafe {
            let node = node_ptr.as_ref();
            let prev = node.prev;
            let next = node.next;

            match prev {
                Some(mut p) => p.as_mut().next = next,
                None => self.head = next,
            }

            match next {
                Some(mut n) => n.as_mut().prev = prev,
                None => self.tail = prev,
            }
        }
    }

    /// Attach a node at the front (MRU position).
    #[inline(always)]
    fn attach_front(&mut self, mut node_ptr: NonNull<Node<K, V>>) {
        unsafe {
            let node = node_ptr.as_mut();
            node.prev = None;
            node.next = self.head;

            match self.head {
                Some(mut h) => h.as_mut().prev = Some(node_ptr),
                None => self.tail = Some(node_ptr),
            }

            self.head = Some(node_ptr);
        }
    }

    /// Pop the tail node (LRU) and return it.
    #[inline(always)]
    fn pop_tail(&mut self) -> Option<Box<Node<K, V>>> {
        self.tail.map(|tail_ptr| unsafe {
            let node = Box::from_raw(tail_ptr.as_ptr());

            self.tail = node.prev;
            match self.tail {
                Some(mut t) => t.as_mut().next = None,
                None => self.head = None,
            }

            node
        })
    }

    /// Validate internal invariants (debug builds only).
    fn validate_invariants(&self) {
        #[cfg(debug_assertions)]
        {
            if self.map.is_empty() {
                debug_assert!(self.head.is_none());
                debug_assert!(self.tail.is_none());
                return;
            }

            // Count nodes from head
            let mut count = 0usize;
            let mut current = self.head;
            while let Some(ptr) = current {
                count += 1;
                unsafe {
                    let node = ptr.as_ref();
                    debug_assert!(self.map.contains_key(&node.key));
                    current = node.next;
                }
                if count > self.map.len() {
                    panic!("Cycle detected in list");
                }
            }

            debug_assert_eq!(count, self.map.len());
        }
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    /// Insert or update. Updating an existing key moves it to MRU without
    /// evicting; a new key may evict the current LRU entry first.
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        // Check for existing key
        if let Some(&node_ptr) = self.map.get(&key) {
            let previous = unsafe {
                let node = &mut *node_ptr.as_ptr();
                std::mem::replace(&mut node.value, value)
            };

            self.detach(node_ptr);
            self.attach_front(node_ptr);

            #[cfg(debug_assertions)]
            self.validate_invariants();

            return Some(previous);
        }

        // For zero capacity, never insert anything
        if self.capacity == 0 {
            return None;
        }

        // Evict if at capacity
        if self.map.len() >= self.capacity {
            if let Some(evicted) = self.pop_tail() {
                self.map.remove(&evicted.key);
            }
        }

        let node = Box::new(Node {
            prev: None,
            next: None,
            key,
            value,
        });
        let node_ptr = NonNull::new(Box::into_raw(node)).unwrap();

        self.map.insert(key, node_ptr);
        self.attach_front(node_ptr);

        #[cfg(debug_assertions)]
        self.validate_invariants();

        None
    }

    /// Get moves the hit entry to the MRU position; a miss has no side
    /// effects.
    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        let node_ptr = match self.map.get(key) {
            Some(&ptr) => ptr,
            None => return None,
        };

        // Move to front (MRU position)
        self.detach(node_ptr);
        self.attach_front(node_ptr);

        #[cfg(debug_assertions)]
        self.validate_invariants();

        unsafe { Some(&(*node_ptr.as_ptr()).value) }
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        // Drop all nodes
        while self.pop_tail().is_some() {}
        self.map.clear();

        self.validate_invariants();
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        let node_ptr = self.map.remove(key)?;

        self.detach(node_ptr);
        let node = unsafe { Box::from_raw(node_ptr.as_ptr()) };

        #[cfg(debug_assertions)]
        self.validate_invariants();

        Some(node.value)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    #[inline]
    fn pop_lru(&mut self) -> Option<(K, V)> {
        let node = self.pop_tail()?;
        self.map.remove(&node.key);

        #[cfg(debug_assertions)]
        self.validate_invariants();

        Some((node.key, node.value))
    }

    #[inline]
    fn peek_lru(&self) -> Option<(&K, &V)> {
        self.tail.map(|tail_ptr| unsafe {
            let node = tail_ptr.as_ref();
            (&node.key, &node.value)
        })
    }

    #[inline]
    fn touch(&mut self, key: &K) -> bool {
        if let Some(&node_ptr) = self.map.get(key) {
            self.detach(node_ptr);
            self.attach_front(node_ptr);

            #[cfg(debug_assertions)]
            self.validate_invariants();

            true
        } else {
            false
        }
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        let &target_ptr = self.map.get(key)?;
        let mut rank = 0usize;
        let mut current = self.head;

        while let Some(ptr) = current {
            if ptr == target_ptr {
                return Some(rank);
            }
            rank += 1;
            current = unsafe { ptr.as_ref().next };
        }
        None
    }
}

// Free all heap-allocated nodes when the cache is dropped
impl<K, V> Drop for LruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    fn drop(&mut self) {
        while self.pop_tail().is_some() {}
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    /// Creates an LRU cache with a default capacity of 16.
    fn default() -> Self {
        Self::new(16)
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
