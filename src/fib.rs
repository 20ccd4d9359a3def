//! Memoized Fibonacci evaluation over interchangeable cache backends.
//!
//! [`Fibonacci`] computes `f(0)=0, f(1)=1, f(n)=f(n-1)+f(n-2)` by consulting
//! a memo store before recomputing and storing every new result keyed by
//! index. The store is a seam: the [`MemoStore`] trait is implemented for
//! both [`LruCache`] (unbounded configuration — nothing is ever evicted for
//! the lifetime of the evaluator) and [`SplayCache`] (every lookup hit
//! reorders the tree around the requested index).
//!
//! Both backends produce identical numeric results for all supported `n`;
//! they differ only in memory layout and access cost. Values are `u128`, so
//! `f(186)` is the largest representable term; larger arguments wrap in
//! release builds and panic in debug builds, like any overflowing `u128`
//! addition.
//!
//! The memo state is explicitly owned by the evaluator rather than hidden in
//! process-global state, so each test (and each caller) gets an independent,
//! resettable cache.
//!
//! ## Example
//!
//! ```
//! use memokit::fib::Fibonacci;
//!
//! let mut lru = Fibonacci::unbounded();
//! let mut splay = Fibonacci::splayed();
//!
//! assert_eq!(lru.value(20), 6765);
//! assert_eq!(splay.value(20), 6765);
//! assert_eq!(lru.value(90), splay.value(90));
//! ```

use crate::policy::lru::LruCache;
use crate::policy::splay::SplayCache;
use crate::traits::{CoreCache, OrderedCache};

/// Memo storage seam for the recurrence evaluator.
///
/// `lookup` may reshape the underlying store (LRU recency order, splay tree
/// shape) — that is the point of consulting the cache.
pub trait MemoStore {
    /// Returns the cached value for index `n`, if present.
    fn lookup(&mut self, n: u64) -> Option<u128>;

    /// Stores the computed value for index `n`.
    fn store(&mut self, n: u64, value: u128);
}

impl MemoStore for LruCache<u64, u128> {
    fn lookup(&mut self, n: u64) -> Option<u128> {
        self.get(&n).copied()
    }

    fn store(&mut self, n: u64, value: u128) {
        self.insert(n, value);
    }
}

impl MemoStore for SplayCache<u64, u128> {
    fn lookup(&mut self, n: u64) -> Option<u128> {
        self.search(&n).copied()
    }

    fn store(&mut self, n: u64, value: u128) {
        self.insert(n, value);
    }
}

/// Frame of the explicit evaluation stack used by
/// [`Fibonacci::value_iterative`].
enum Frame {
    Eval(u64),
    Combine(u64),
}

/// Memoized Fibonacci evaluator over a [`MemoStore`] backend.
pub struct Fibonacci<S> {
    memo: S,
}

impl Fibonacci<LruCache<u64, u128>> {
    /// Evaluator backed by a never-evicting LRU cache.
    ///
    /// Every computed `(n, f(n))` pair is retained for the lifetime of the
    /// evaluator.
    pub fn unbounded() -> Self {
        Self {
            memo: LruCache::unbounded(),
        }
    }
}

impl Fibonacci<SplayCache<u64, u128>> {
    /// Evaluator backed by a splay tree, pre-seeded with the base cases
    /// `f(0)=0` and `f(1)=1`.
    pub fn splayed() -> Self {
        let mut memo = SplayCache::new();
        memo.insert(0, 0);
        memo.insert(1, 1);
        Self { memo }
    }
}

impl<S: MemoStore> Fibonacci<S> {
    /// Evaluator over a caller-provided memo store.
    pub fn new(memo: S) -> Self {
        Self { memo }
    }

    /// Borrows the memo store (e.g. to inspect cache state in tests).
    pub fn memo(&self) -> &S {
        &self.memo
    }

    /// Computes `f(n)` recursively, consulting the memo before recursing.
    ///
    /// Recursion depth is bounded by `n` on a cold cache; for arguments
    /// large enough to threaten the call stack, use
    /// [`value_iterative`](Self::value_iterative).
    pub fn value(&mut self, n: u64) -> u128 {
        if let Some(v) = self.memo.lookup(n) {
            return v;
        }
        if n < 2 {
            return n as u128;
        }
        let a = self.value(n - 1);
        let b = self.value(n - 2);
        let v = a + b;
        self.memo.store(n, v);
        v
    }

    /// Computes `f(n)` with an explicit work stack instead of recursion.
    ///
    /// Identical results to [`value`](Self::value) — same memo consultation
    /// order (f(n-1) before f(n-2)), same stored entries — but depth lives
    /// on the heap, so it is safe for any `n` the value type can hold.
    ///
    /// Operand values travel through the frame stack rather than being
    /// re-read from the memo, so the evaluation terminates even over a memo
    /// store small enough to evict a child result before its parent combines
    /// it.
    pub fn value_iterative(&mut self, n: u64) -> u128 {
        let mut frames = vec![Frame::Eval(n)];
        let mut results: Vec<u128> = Vec::new();

        while let Some(frame) = frames.pop() {
            match frame {
                Frame::Eval(m) => {
                    if let Some(v) = self.memo.lookup(m) {
                        results.push(v);
                    } else if m < 2 {
                        results.push(m as u128);
                    } else {
                        // Eval(m - 1) is pushed last so it runs first,
                        // matching the recursive evaluation order
                        frames.push(Frame::Combine(m));
                        frames.push(Frame::Eval(m - 2));
                        frames.push(Frame::Eval(m - 1));
                    }
                }
                Frame::Combine(m) => {
                    let b = results.pop().expect("one operand per Eval frame");
                    let a = results.pop().expect("one operand per Eval frame");
                    let v = a + b;
                    self.memo.store(m, v);
                    results.push(v);
                }
            }
        }

        results.pop().expect("one result per evaluation")
    }
}
