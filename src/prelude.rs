pub use crate::ds::{SlotArena, SlotId};
pub use crate::error::{IndexOutOfRangeError, InvariantError, LengthMismatchError};
pub use crate::fib::{Fibonacci, MemoStore};
pub use crate::policy::lru::LruCache;
pub use crate::policy::splay::SplayCache;
pub use crate::range_sum::RangeSumCache;
pub use crate::traits::{CoreCache, LruCacheTrait, MutableCache, OrderedCache};
