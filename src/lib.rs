//! memokit: bounded and self-adjusting cache primitives with memoization consumers.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod ds;
pub mod error;
pub mod fib;
pub mod policy;
pub mod prelude;
pub mod range_sum;
pub mod traits;
