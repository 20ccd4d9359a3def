//! Range-sum query caching over a mutable backing array.
//!
//! [`RangeSumCache`] owns a sequence of `i64` elements and an
//! [`LruCache`] keyed by `(low, high)` range bounds mapping to precomputed
//! inclusive sums. Any point update clears the **entire** cache: computing
//! which cached ranges overlap a mutated index would need interval-overlap
//! bookkeeping, so the policy trades hit rate for
//! correctness-by-construction. A cached sum is therefore always correct for
//! the current array contents.
//!
//! Bounds are checked: out-of-range or inverted bounds return
//! [`IndexOutOfRangeError`] rather than being a caller-responsibility
//! precondition.
//!
//! ## Example
//!
//! ```
//! use memokit::range_sum::RangeSumCache;
//!
//! let mut system = RangeSumCache::new(5, 16);
//! system.load(vec![1, 2, 3, 4, 5]).unwrap();
//!
//! assert_eq!(system.range_sum(1, 3).unwrap(), 9);
//! assert_eq!(system.cached_entries(), 1);
//!
//! // A point write invalidates everything
//! system.update(0, 100).unwrap();
//! assert_eq!(system.cached_entries(), 0);
//! assert_eq!(system.range_sum(0, 4).unwrap(), 114);
//! ```

use crate::error::{IndexOutOfRangeError, LengthMismatchError};
use crate::policy::lru::LruCache;
use crate::traits::CoreCache;

/// Mutable array with an LRU cache of inclusive range sums.
///
/// A cache capacity of 0 emulates "no cache": every query recomputes, which
/// is the baseline the cached configuration is benchmarked against.
#[derive(Debug)]
pub struct RangeSumCache {
    data: Vec<i64>,
    cache: LruCache<(usize, usize), i64>,
}

impl RangeSumCache {
    /// Creates a system over a zero-filled array of `len` elements with a
    /// sum cache of `cache_capacity` entries.
    pub fn new(len: usize, cache_capacity: usize) -> Self {
        Self {
            data: vec![0; len],
            cache: LruCache::new(cache_capacity),
        }
    }

    /// Number of elements in the backing array.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the backing array is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of range sums currently cached.
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    /// Replaces the full backing array.
    ///
    /// Fails before any state changes if `data.len()` does not match the
    /// configured size; the previous array and cache contents survive a
    /// failed load. A successful load clears the cache, since every cached
    /// sum described the old contents.
    pub fn load(&mut self, data: Vec<i64>) -> Result<(), LengthMismatchError> {
        if data.len() != self.data.len() {
            return Err(LengthMismatchError::new(self.data.len(), data.len()));
        }
        self.data = data;
        self.cache.clear();
        Ok(())
    }

    /// Sum over the inclusive index range `[low, high]`, consulting the
    /// cache.
    ///
    /// On a hit the stored sum is returned (and refreshed to most recently
    /// used); on a miss the sum is computed, stored under `(low, high)`, and
    /// returned.
    pub fn range_sum(&mut self, low: usize, high: usize) -> Result<i64, IndexOutOfRangeError> {
        self.check_range(low, high)?;

        let key = (low, high);
        if let Some(&sum) = self.cache.get(&key) {
            return Ok(sum);
        }

        let sum = self.data[low..=high].iter().sum();
        self.cache.insert(key, sum);
        Ok(sum)
    }

    /// Sum over `[low, high]` by direct summation, bypassing the cache.
    pub fn range_sum_uncached(&self, low: usize, high: usize) -> Result<i64, IndexOutOfRangeError> {
        self.check_range(low, high)?;
        Ok(self.data[low..=high].iter().sum())
    }

    /// Writes `value` at `index`, then clears the entire sum cache.
    ///
    /// Coarse invalidation: every cached range is discarded even when it
    /// does not overlap `index`.
    pub fn update(&mut self, index: usize, value: i64) -> Result<(), IndexOutOfRangeError> {
        self.check_index(index)?;
        self.data[index] = value;
        self.cache.clear();
        Ok(())
    }

    /// Writes `value` at `index` without touching the cache.
    ///
    /// Baseline counterpart to [`update`](Self::update) for cacheless
    /// configurations; with a capacity-0 cache the two are equivalent.
    pub fn update_uncached(&mut self, index: usize, value: i64) -> Result<(), IndexOutOfRangeError> {
        self.check_index(index)?;
        self.data[index] = value;
        Ok(())
    }

    fn check_range(&self, low: usize, high: usize) -> Result<(), IndexOutOfRangeError> {
        if low > high {
            return Err(IndexOutOfRangeError::new(format!(
                "inverted range bounds: low {low} > high {high}"
            )));
        }
        if high >= self.data.len() {
            return Err(IndexOutOfRangeError::new(format!(
                "range [{low}, {high}] exceeds array length {}",
                self.data.len()
            )));
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), IndexOutOfRangeError> {
        if index >= self.data.len() {
            return Err(IndexOutOfRangeError::new(format!(
                "index {index} exceeds array length {}",
                self.data.len()
            )));
        }
        Ok(())
    }
}
