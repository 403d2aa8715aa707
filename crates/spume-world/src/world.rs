//! World state — the three body collections plus per-tick lookup caches.
//!
//! The caches replace what the original design would express as mutable
//! globals ("the current beacon", "the agent being dragged"): here they
//! are plain nullable indices, recomputed or revalidated at tick start,
//! never ownership.

use spume_types::{BodyIndex, BodyKind, Scalar, SpumeResult, TickIndex};

use crate::arena::BodyArena;

/// Default pre-reservation for the bubble collection.
const DEFAULT_BUBBLE_CAPACITY: usize = 32_768;

/// The complete collision-visible state of one simulation world.
///
/// Bubbles, agents and obstacles are separate arenas because their
/// populations differ by two to three orders of magnitude and take
/// different collision paths (broad phase vs direct nested iteration).
pub struct World {
    /// The large drifting population. Broad-phase path.
    pub bubbles: BodyArena,
    /// Actor bodies, a few hundred at most. Direct-iteration path.
    pub agents: BodyArena,
    /// Fixed level geometry. Never moves.
    pub obstacles: BodyArena,

    /// Current tick.
    pub tick: TickIndex,
    /// Accumulated simulation time in seconds.
    pub sim_time: f64,

    // ─── Per-tick caches ───
    beacon: Option<BodyIndex>,
    held_agent: Option<BodyIndex>,
}

impl World {
    /// Creates an empty world with the default bubble pre-reservation.
    pub fn new() -> Self {
        Self::with_bubble_capacity(DEFAULT_BUBBLE_CAPACITY)
    }

    /// Creates an empty world reserving room for `capacity` bubbles.
    pub fn with_bubble_capacity(capacity: usize) -> Self {
        Self {
            bubbles: BodyArena::with_capacity(capacity),
            agents: BodyArena::new(),
            obstacles: BodyArena::new(),
            tick: TickIndex::ZERO,
            sim_time: 0.0,
            beacon: None,
            held_agent: None,
        }
    }

    /// Total body count across all three collections.
    pub fn body_count(&self) -> usize {
        self.bubbles.len() + self.agents.len() + self.obstacles.len()
    }

    /// Advances the tick counter and clock and recomputes the caches.
    ///
    /// Called once at the top of every tick, before any collision pass
    /// reads [`World::beacon`] or [`World::held_agent`].
    pub fn begin_tick(&mut self, dt: Scalar) {
        self.tick = self.tick.next();
        self.sim_time += dt as f64;
        self.refresh_caches();
    }

    /// Recomputes the beacon cache and drops a stale held-agent index.
    pub fn refresh_caches(&mut self) {
        self.beacon = self
            .agents
            .kind
            .iter()
            .position(|k| *k == BodyKind::Beacon)
            .map(|i| BodyIndex(i as u32));

        if let Some(held) = self.held_agent {
            if held.index() >= self.agents.len() {
                self.held_agent = None;
            }
        }
    }

    /// The unique beacon agent, if one exists this tick.
    #[inline]
    pub fn beacon(&self) -> Option<BodyIndex> {
        self.beacon
    }

    /// The agent the user is currently dragging, if any.
    #[inline]
    pub fn held_agent(&self) -> Option<BodyIndex> {
        self.held_agent
    }

    /// Marks an agent as user-held (or releases with `None`).
    ///
    /// A held agent still pushes everything it touches but receives no
    /// displacement itself until released.
    pub fn set_held_agent(&mut self, agent: Option<BodyIndex>) {
        self.held_agent = agent;
    }

    /// Mass factor an agent presents to the narrow phase this tick.
    ///
    /// The held agent is weighted as immovable; everyone else uses the
    /// kind table.
    pub fn agent_mass_factor(&self, i: usize) -> Scalar {
        if self.held_agent == Some(BodyIndex(i as u32)) {
            0.0
        } else {
            self.agents.kind[i].mass_factor()
        }
    }

    /// Checks the invariants of all three collections.
    pub fn validate(&self) -> SpumeResult<()> {
        self.bubbles.validate()?;
        self.agents.validate()?;
        self.obstacles.validate()?;
        Ok(())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
