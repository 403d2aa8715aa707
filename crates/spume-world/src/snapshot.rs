//! World snapshot serialization for inspection and replay.
//!
//! Snapshots capture the collision-visible state at a point in time.
//! This is debug tooling, not save-game persistence — the surrounding
//! application owns its own save format.

use serde::{Deserialize, Serialize};

use spume_types::{BodyKind, SpumeError, SpumeResult, TickIndex};

use crate::arena::BodyArena;
use crate::world::World;

/// Snapshot of one body collection.
///
/// Positions and velocities are flattened `[x0, y0, x1, y1, ...]` for a
/// compact binary layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub positions: Vec<f32>,
    pub velocities: Vec<f32>,
    pub radii: Vec<f32>,
    pub inv_masses: Vec<f32>,
    pub kinds: Vec<BodyKind>,
}

impl ArenaSnapshot {
    fn capture(arena: &BodyArena) -> Self {
        let n = arena.len();
        let mut positions = Vec::with_capacity(n * 2);
        let mut velocities = Vec::with_capacity(n * 2);

        for i in 0..n {
            positions.push(arena.pos_x[i]);
            positions.push(arena.pos_y[i]);
            velocities.push(arena.vel_x[i]);
            velocities.push(arena.vel_y[i]);
        }

        Self {
            positions,
            velocities,
            radii: arena.radius.clone(),
            inv_masses: arena.inv_mass.clone(),
            kinds: arena.kind.clone(),
        }
    }

    /// Number of bodies captured.
    pub fn body_count(&self) -> usize {
        self.radii.len()
    }

    fn restore_into(&self, arena: &mut BodyArena) -> SpumeResult<()> {
        let n = self.body_count();
        if self.positions.len() != n * 2
            || self.velocities.len() != n * 2
            || self.inv_masses.len() != n
            || self.kinds.len() != n
        {
            return Err(SpumeError::Serialization(
                "snapshot arena has mismatched column lengths".into(),
            ));
        }

        arena.clear();
        for i in 0..n {
            arena.pos_x.push(self.positions[i * 2]);
            arena.pos_y.push(self.positions[i * 2 + 1]);
            arena.vel_x.push(self.velocities[i * 2]);
            arena.vel_y.push(self.velocities[i * 2 + 1]);
        }
        arena.radius = self.radii.clone();
        arena.inv_mass = self.inv_masses.clone();
        arena.kind = self.kinds.clone();
        Ok(())
    }
}

/// A complete world snapshot.
///
/// Serialized with `bincode` for compact binary output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Tick index when this snapshot was taken.
    pub tick: u64,
    /// Simulation time in seconds.
    pub sim_time: f64,
    pub bubbles: ArenaSnapshot,
    pub agents: ArenaSnapshot,
    pub obstacles: ArenaSnapshot,
}

impl WorldSnapshot {
    /// Captures the current state of a world.
    pub fn capture(world: &World) -> Self {
        Self {
            tick: world.tick.0,
            sim_time: world.sim_time,
            bubbles: ArenaSnapshot::capture(&world.bubbles),
            agents: ArenaSnapshot::capture(&world.agents),
            obstacles: ArenaSnapshot::capture(&world.obstacles),
        }
    }

    /// Total bodies across all collections.
    pub fn body_count(&self) -> usize {
        self.bubbles.body_count() + self.agents.body_count() + self.obstacles.body_count()
    }

    /// Serializes to compact binary format.
    pub fn to_bytes(&self) -> SpumeResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| SpumeError::Serialization(e.to_string()))
    }

    /// Deserializes from binary format.
    pub fn from_bytes(data: &[u8]) -> SpumeResult<Self> {
        bincode::deserialize(data).map_err(|e| SpumeError::Serialization(e.to_string()))
    }

    /// Rebuilds a world from this snapshot.
    ///
    /// The per-tick caches are refreshed so the world is ready for the
    /// next [`World::begin_tick`] immediately.
    pub fn restore(&self) -> SpumeResult<World> {
        let mut world = World::with_bubble_capacity(self.bubbles.body_count().max(1));
        world.tick = TickIndex(self.tick);
        world.sim_time = self.sim_time;
        self.bubbles.restore_into(&mut world.bubbles)?;
        self.agents.restore_into(&mut world.agents)?;
        self.obstacles.restore_into(&mut world.obstacles)?;
        world.refresh_caches();
        Ok(world)
    }
}
