//! Scalar type alias for the collision core.
//!
//! Using `f32` to keep body arrays compact — at tens of thousands of
//! bodies per tick, halving the footprint of every position/velocity
//! column matters more than the extra precision of `f64`.

/// The floating-point type used throughout the collision core.
///
/// Set to `f32` for cache density at scale. Change to `f64` for
/// double-precision validation runs.
pub type Scalar = f32;
