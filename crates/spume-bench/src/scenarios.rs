//! Procedural benchmark scenarios.
//!
//! Each scenario pairs a seeded world generator with a pipeline config:
//! a wide drift field of 20k bubbles (the nominal load), a dense
//! cluster that stresses the broad-phase active set, and an obstacle
//! gauntlet that exercises all three collision passes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use spume_contact::PipelineConfig;
use spume_types::{BodyKind, Vec2};
use spume_world::World;

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// Wide world, nominal density. The headline workload.
    DriftField,
    /// Everything in one small region, worst-case active set.
    DenseCluster,
    /// Bubbles plus agents plus a line of obstacles.
    ObstacleGauntlet,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::DriftField,
            ScenarioKind::DenseCluster,
            ScenarioKind::ObstacleGauntlet,
        ]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::DriftField => "drift_field",
            ScenarioKind::DenseCluster => "dense_cluster",
            ScenarioKind::ObstacleGauntlet => "obstacle_gauntlet",
        }
    }
}

/// A fully specified benchmark scenario.
///
/// The world is rebuilt from the seed for every run, so repeated runs
/// (and worker sweeps) start from identical state.
pub struct Scenario {
    /// Scenario type.
    pub kind: ScenarioKind,
    /// Bubble population.
    pub bubbles: usize,
    /// Agent population (one beacon among them when nonzero).
    pub agents: usize,
    /// Obstacle population.
    pub obstacles: usize,
    /// World extent.
    pub width: f32,
    /// World extent.
    pub height: f32,
    /// Number of ticks to simulate.
    pub ticks: u32,
    /// Timestep size (seconds).
    pub dt: f32,
    /// RNG seed for world generation.
    pub seed: u64,
    /// Pipeline configuration.
    pub config: PipelineConfig,
}

impl Scenario {
    /// Create the drift field scenario.
    ///
    /// 20,000 radius-8 bubbles in a 2000×1000 world with gentle random
    /// drift, 120 ticks at 60fps.
    pub fn drift_field() -> Self {
        Self {
            kind: ScenarioKind::DriftField,
            bubbles: 20_000,
            agents: 0,
            obstacles: 0,
            width: 2000.0,
            height: 1000.0,
            ticks: 120,
            dt: 1.0 / 60.0,
            seed: 42,
            config: PipelineConfig::default(),
        }
    }

    /// Create the dense cluster scenario.
    ///
    /// 5,000 bubbles packed into 400×400 — the active set degrades
    /// toward O(N) per event, which is exactly what this measures.
    pub fn dense_cluster() -> Self {
        Self {
            kind: ScenarioKind::DenseCluster,
            bubbles: 5_000,
            agents: 0,
            obstacles: 0,
            width: 400.0,
            height: 400.0,
            ticks: 60,
            dt: 1.0 / 60.0,
            seed: 42,
            config: PipelineConfig {
                expected_bubbles: 5_000,
                ..PipelineConfig::default()
            },
        }
    }

    /// Create the obstacle gauntlet scenario.
    ///
    /// 8,000 bubbles, 12 agents (one of them the beacon), and a line of
    /// 8 obstacles across the middle of the world, exercising all three
    /// collision passes.
    pub fn obstacle_gauntlet() -> Self {
        Self {
            kind: ScenarioKind::ObstacleGauntlet,
            bubbles: 8_000,
            agents: 12,
            obstacles: 8,
            width: 1200.0,
            height: 600.0,
            ticks: 120,
            dt: 1.0 / 60.0,
            seed: 42,
            config: PipelineConfig {
                expected_bubbles: 8_000,
                ..PipelineConfig::default()
            },
        }
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::DriftField => Self::drift_field(),
            ScenarioKind::DenseCluster => Self::dense_cluster(),
            ScenarioKind::ObstacleGauntlet => Self::obstacle_gauntlet(),
        }
    }

    /// Overrides the tick count.
    pub fn with_ticks(mut self, ticks: u32) -> Self {
        self.ticks = ticks;
        self
    }

    /// Overrides the pipeline configuration.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the scenario's world from its seed.
    ///
    /// Every fiftieth bubble is volatile. Agents ring the world center;
    /// the first spawned agent is the beacon. Obstacles form a
    /// horizontal line across the middle.
    pub fn build_world(&self) -> World {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut world = World::with_bubble_capacity(self.bubbles.max(1));

        for i in 0..self.bubbles {
            let pos = Vec2::new(
                rng.gen_range(0.0..self.width),
                rng.gen_range(0.0..self.height),
            );
            let vel = Vec2::new(rng.gen_range(-20.0..20.0), rng.gen_range(-20.0..20.0));
            let kind = if i % 50 == 49 {
                BodyKind::Volatile
            } else {
                BodyKind::Bubble
            };
            world.bubbles.spawn(kind, pos, vel);
        }

        let center = Vec2::new(self.width * 0.5, self.height * 0.5);
        for i in 0..self.agents {
            let angle = i as f32 / self.agents.max(1) as f32 * std::f32::consts::TAU;
            let pos = center + Vec2::new(angle.cos(), angle.sin()) * (self.height * 0.25);
            let kind = if i == 0 { BodyKind::Beacon } else { BodyKind::Agent };
            world.agents.spawn(kind, pos, Vec2::ZERO);
        }

        for i in 0..self.obstacles {
            let step = self.width / (self.obstacles as f32 + 1.0);
            let pos = Vec2::new(step * (i as f32 + 1.0), self.height * 0.5);
            world.obstacles.spawn(BodyKind::Obstacle, pos, Vec2::ZERO);
        }

        world
    }
}
