//! Index newtypes.
//!
//! Wrapping the raw integers keeps body indices from being confused
//! with tick counters or buffer offsets at call sites.

use serde::{Deserialize, Serialize};

/// Index into a body collection's column arrays.
///
/// Indices are collection-local: a `BodyIndex` obtained from the bubble
/// arena must not be used to address the agent arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyIndex(pub u32);

/// Monotonic simulation tick counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TickIndex(pub u64);

impl BodyIndex {
    /// The raw index, widened for column addressing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TickIndex {
    /// The tick before any simulation has run.
    pub const ZERO: Self = Self(0);

    /// Returns the tick that follows this one.
    #[inline]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u32> for BodyIndex {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u64> for TickIndex {
    fn from(val: u64) -> Self {
        Self(val)
    }
}
