//! Domain collision passes.
//!
//! Three call sites feed the generic machinery: bubble↔bubble runs
//! through the broad phase and the worker pool because counts are in
//! the tens of thousands; agent↔agent and agent↔obstacle run direct
//! nested iteration because their counts are two to three orders of
//! magnitude smaller and a broad phase would cost more than it saves.

use spume_types::Scalar;
use spume_world::{BodyArena, World};

use crate::broad::SweepIndex;
use crate::coloring::PairColoring;
use crate::delta::DeltaBuffer;
use crate::dispatch::WorkerPool;
use crate::narrow::{resolve, CircleState, CollisionOutcome};

/// Counters from one bubble-pass invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassOutcome {
    /// Broad-phase candidate pairs swept this tick.
    pub candidates: u32,
    /// Pairs that truly overlapped and were resolved.
    pub resolved: u32,
    /// Color classes used (1 for the accumulate path).
    pub batches: u32,
}

/// Bubble↔bubble pass with thread-local accumulation write-back.
///
/// Exactly one fork-join round: workers fold outcomes into their own
/// [`DeltaBuffer`], then the buffers merge into the arena after the
/// barrier, single-threaded.
pub fn bubble_pass_accumulate(
    bubbles: &mut BodyArena,
    index: &mut SweepIndex,
    pool: &WorkerPool,
    scratch: &mut [DeltaBuffer],
    dt: Scalar,
) -> PassOutcome {
    index.clear();
    index.populate(bubbles);

    {
        let arena = &*bubbles;
        index.for_each_unique_index_pair(pool, scratch, |buf, i, j| {
            let a = CircleState::from_arena(arena, i as usize);
            let b = CircleState::from_arena(arena, j as usize);
            if let Some(outcome) = resolve(dt, &a, &b) {
                buf.add_pair(i, j, &outcome);
            }
        });
    }

    let mut resolved = 0;
    for buf in scratch.iter_mut() {
        resolved += buf.resolved_pairs();
        buf.merge_into(bubbles);
    }

    PassOutcome {
        candidates: index.candidates().len() as u32,
        resolved,
        batches: 1,
    }
}

/// Bubble↔bubble pass with conflict-free color classes.
///
/// Pairs are greedy-colored so no two pairs in a class share a body;
/// each class is resolved in parallel from a read-only arena into
/// `outcomes`, then applied single-threaded before the next class runs.
/// Costs extra fork-join rounds but loses no updates.
pub fn bubble_pass_colored(
    bubbles: &mut BodyArena,
    index: &mut SweepIndex,
    pool: &WorkerPool,
    outcomes: &mut Vec<Option<CollisionOutcome>>,
    dt: Scalar,
) -> PassOutcome {
    index.clear();
    index.populate(bubbles);
    index.collect_candidates();

    let (sorted, offsets) = PairColoring::color_pairs(index.candidates(), bubbles.len());
    let mut resolved = 0;

    for window in offsets.windows(2) {
        let class = &sorted[window[0]..window[1]];

        {
            let arena = &*bubbles;
            pool.map_pairs(class, outcomes, |i, j| {
                let a = CircleState::from_arena(arena, i as usize);
                let b = CircleState::from_arena(arena, j as usize);
                resolve(dt, &a, &b)
            });
        }

        for (pair, outcome) in class.iter().zip(outcomes.iter()) {
            if let Some(outcome) = outcome {
                bubbles.apply_correction(pair.a as usize, outcome.disp_a, outcome.dvel_a);
                bubbles.apply_correction(pair.b as usize, outcome.disp_b, outcome.dvel_b);
                resolved += 1;
            }
        }
    }

    PassOutcome {
        candidates: index.candidates().len() as u32,
        resolved,
        batches: (offsets.len() - 1) as u32,
    }
}

/// Agent↔agent pass: direct nested iteration, corrections applied
/// immediately. A held agent presents mass factor 0, so it receives
/// nothing but still pushes its partner.
pub fn agent_agent_pass(world: &mut World, dt: Scalar) -> u32 {
    let n = world.agents.len();
    let mut resolved = 0;

    for i in 0..n {
        for j in (i + 1)..n {
            let a = CircleState::from_arena(&world.agents, i)
                .with_mass_factor(world.agent_mass_factor(i));
            let b = CircleState::from_arena(&world.agents, j)
                .with_mass_factor(world.agent_mass_factor(j));

            if let Some(outcome) = resolve(dt, &a, &b) {
                world.agents.apply_correction(i, outcome.disp_a, outcome.dvel_a);
                world.agents.apply_correction(j, outcome.disp_b, outcome.dvel_b);
                resolved += 1;
            }
        }
    }

    resolved
}

/// Agent↔obstacle pass: direct nested iteration. The obstacle side is
/// immovable by its stored inverse mass, so the resolver hands the
/// entire correction to the agent.
pub fn agent_obstacle_pass(world: &mut World, dt: Scalar) -> u32 {
    let mut resolved = 0;

    for i in 0..world.agents.len() {
        for j in 0..world.obstacles.len() {
            let a = CircleState::from_arena(&world.agents, i)
                .with_mass_factor(world.agent_mass_factor(i));
            let b = CircleState::from_arena(&world.obstacles, j);

            if let Some(outcome) = resolve(dt, &a, &b) {
                world.agents.apply_correction(i, outcome.disp_a, outcome.dvel_a);
                world.obstacles.apply_correction(j, outcome.disp_b, outcome.dvel_b);
                resolved += 1;
            }
        }
    }

    resolved
}
