//! Per-worker correction accumulation.
//!
//! The default write-back mode: during the fork-join round each worker
//! folds resolver outcomes into its own buffer, and after the barrier
//! the driver merges all buffers into the arena single-threaded. No
//! worker ever touches the shared body columns, so there is nothing to
//! race on.

use spume_types::Vec2;
use spume_world::BodyArena;

use crate::narrow::CollisionOutcome;

#[derive(Debug, Clone, Copy)]
struct DeltaEntry {
    body: u32,
    disp: Vec2,
    dvel: Vec2,
}

/// Sparse buffer of pending corrections for one worker.
///
/// Entries are appended, never combined; the same body may appear many
/// times (dense clusters), and merging simply adds them all in turn.
/// Corrections are all computed from tick-start state, so overlapping
/// pairs can jointly overcorrect slightly — bounded, and the price of
/// keeping the round race-free in one barrier.
#[derive(Debug, Default)]
pub struct DeltaBuffer {
    entries: Vec<DeltaEntry>,
    resolved_pairs: u32,
}

impl DeltaBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records both sides of a resolved pair.
    pub fn add_pair(&mut self, a: u32, b: u32, outcome: &CollisionOutcome) {
        self.entries.push(DeltaEntry {
            body: a,
            disp: outcome.disp_a,
            dvel: outcome.dvel_a,
        });
        self.entries.push(DeltaEntry {
            body: b,
            disp: outcome.disp_b,
            dvel: outcome.dvel_b,
        });
        self.resolved_pairs += 1;
    }

    /// Number of pairs recorded since the last clear.
    pub fn resolved_pairs(&self) -> u32 {
        self.resolved_pairs
    }

    /// Returns true if no corrections are pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies every pending correction to the arena and clears the
    /// buffer, retaining capacity for the next tick.
    pub fn merge_into(&mut self, arena: &mut BodyArena) {
        for entry in &self.entries {
            arena.apply_correction(entry.body as usize, entry.disp, entry.dvel);
        }
        self.clear();
    }

    /// Drops pending corrections, retaining capacity.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.resolved_pairs = 0;
    }
}
