//! Broad-phase candidate discovery via a single-axis interval sweep.
//!
//! Quickly identifies *candidate* collision pairs so the narrow phase
//! never runs an O(n²) scan. The index is rebuilt from scratch every
//! tick — bodies move continuously, so stale intervals would be wrong —
//! but all working buffers keep their capacity across rebuilds.

use spume_types::constants::CANDIDATES_PER_BODY;
use spume_types::Scalar;
use spume_world::BodyArena;

use crate::dispatch::WorkerPool;

/// Candidate pair from the broad phase (indices into one body arena).
///
/// Always stored canonically with `a < b`, so a pair is emitted at most
/// once per tick and never as a self-pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidatePair {
    /// Lower body index.
    pub a: u32,
    /// Higher body index.
    pub b: u32,
}

impl CandidatePair {
    /// Creates a canonically ordered pair. `i` and `j` must differ.
    #[inline]
    pub fn new(i: u32, j: u32) -> Self {
        debug_assert_ne!(i, j, "self-pair");
        if i < j {
            Self { a: i, b: j }
        } else {
            Self { a: j, b: i }
        }
    }
}

/// One body's extent on the sweep axis plus the perpendicular extent
/// used for cheap refinement.
#[derive(Debug, Clone, Copy)]
struct IntervalEvent {
    body: u32,
    start: Scalar,
    end: Scalar,
    y_min: Scalar,
    y_max: Scalar,
}

/// Sort-and-sweep broad phase over the X axis.
///
/// The world scrolls horizontally, so bodies spread primarily along X;
/// sweeping that axis keeps the active set small. Events are sorted by
/// interval start with ties broken by body index, making pair emission
/// order a pure function of current positions and radii.
///
/// The candidate buffer is pre-reserved and reused every tick to avoid
/// allocation churn at tens-of-thousands-of-bodies scale.
#[derive(Debug, Default)]
pub struct SweepIndex {
    events: Vec<IntervalEvent>,
    candidates: Vec<CandidatePair>,
}

impl SweepIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an index with buffers sized for `bodies` entries.
    pub fn with_capacity(bodies: usize) -> Self {
        Self {
            events: Vec::with_capacity(bodies),
            candidates: Vec::with_capacity(bodies * CANDIDATES_PER_BODY),
        }
    }

    /// Empties the internal buffers, retaining their capacity.
    pub fn clear(&mut self) {
        self.events.clear();
        self.candidates.clear();
    }

    /// Builds and sorts the interval events from current positions/radii.
    ///
    /// Call after [`SweepIndex::clear`], once per tick.
    pub fn populate(&mut self, arena: &BodyArena) {
        for i in 0..arena.len() {
            let x = arena.pos_x[i];
            let y = arena.pos_y[i];
            let r = arena.radius[i];
            self.events.push(IntervalEvent {
                body: i as u32,
                start: x - r,
                end: x + r,
                y_min: y - r,
                y_max: y + r,
            });
        }

        self.events.sort_unstable_by(|a, b| {
            a.start
                .partial_cmp(&b.start)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.body.cmp(&b.body))
        });
    }

    /// Sweeps the sorted events and fills the candidate buffer.
    ///
    /// A body entering the sweep is tested only against bodies whose
    /// interval has started but not yet ended, so comparisons stay local
    /// to geometric neighbors. Pairs must also overlap on the Y axis;
    /// the exact circle-distance test is left to the narrow phase.
    pub fn collect_candidates(&mut self) -> &[CandidatePair] {
        self.candidates.clear();
        let n = self.events.len();

        for i in 0..n {
            let lead = self.events[i];
            for follow in &self.events[(i + 1)..n] {
                // Events are sorted by start: once one starts past the
                // lead interval's end, no later event can overlap it.
                if follow.start > lead.end {
                    break;
                }
                if follow.y_min <= lead.y_max && lead.y_min <= follow.y_max {
                    self.candidates.push(CandidatePair::new(lead.body, follow.body));
                }
            }
        }

        &self.candidates
    }

    /// The candidate buffer from the most recent sweep.
    pub fn candidates(&self) -> &[CandidatePair] {
        &self.candidates
    }

    /// Number of interval events currently populated.
    pub fn body_count(&self) -> usize {
        self.events.len()
    }

    /// Sweeps for candidates, then invokes `callback` for every unique
    /// pair across the worker pool and blocks until all workers finish.
    ///
    /// The candidate buffer is split into one contiguous chunk per
    /// scratch slot; each worker receives exclusive access to its slot
    /// for the duration of the fork-join round. With zero or one body
    /// populated there is nothing to sweep and the call returns at once.
    pub fn for_each_unique_index_pair<S, F>(
        &mut self,
        pool: &WorkerPool,
        scratch: &mut [S],
        callback: F,
    ) where
        S: Send,
        F: Fn(&mut S, u32, u32) + Sync,
    {
        if self.events.len() < 2 {
            self.candidates.clear();
            return;
        }
        self.collect_candidates();
        pool.dispatch_pairs(&self.candidates, scratch, callback);
    }
}
