//! Error types for the memokit library.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (`check_invariants` methods).
//! - [`LengthMismatchError`]: Returned by [`RangeSumCache::load`] when the
//!   supplied data does not match the configured backing-array size.
//! - [`IndexOutOfRangeError`]: Returned by range-sum operations when indices
//!   fall outside the backing array or a range is inverted.
//!
//! [`RangeSumCache::load`]: crate::range_sum::RangeSumCache::load
//!
//! ## Example Usage
//!
//! ```
//! use memokit::range_sum::RangeSumCache;
//!
//! let mut system = RangeSumCache::new(4, 16);
//!
//! // Length mismatch is caught without panicking
//! assert!(system.load(vec![1, 2, 3]).is_err());
//! assert!(system.load(vec![1, 2, 3, 4]).is_ok());
//!
//! // Out-of-range bounds are a checked error, not undefined behavior
//! assert!(system.range_sum(2, 9).is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` methods on cache types
/// (e.g. [`SplayCache::check_invariants`](crate::policy::splay::SplayCache::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// LengthMismatchError
// ---------------------------------------------------------------------------

/// Error returned when loaded data does not match the configured array size.
///
/// Produced by [`RangeSumCache::load`](crate::range_sum::RangeSumCache::load).
/// The load fails before any state changes; the previous backing array is
/// left intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthMismatchError {
    expected: usize,
    actual: usize,
}

impl LengthMismatchError {
    /// Creates a new `LengthMismatchError` for the given sizes.
    #[inline]
    pub fn new(expected: usize, actual: usize) -> Self {
        Self { expected, actual }
    }

    /// The configured backing-array size.
    #[inline]
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// The length of the rejected input.
    #[inline]
    pub fn actual(&self) -> usize {
        self.actual
    }
}

impl fmt::Display for LengthMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "data length {} does not match configured size {}",
            self.actual, self.expected
        )
    }
}

impl std::error::Error for LengthMismatchError {}

// ---------------------------------------------------------------------------
// IndexOutOfRangeError
// ---------------------------------------------------------------------------

/// Error returned when an index or range falls outside the backing array.
///
/// Produced by [`RangeSumCache`](crate::range_sum::RangeSumCache) query and
/// update operations. Carries a human-readable description of the offending
/// bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOutOfRangeError(String);

impl IndexOutOfRangeError {
    /// Creates a new `IndexOutOfRangeError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IndexOutOfRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for IndexOutOfRangeError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
