//! Per-tick orchestration of the three collision passes.
//!
//! The pipeline owns the broad-phase index, the worker pool, and the
//! write-back scratch; the driver owns the world and calls
//! [`CollisionPipeline::step`] once per tick.

use std::time::{Duration, Instant};

use spume_types::{Scalar, SpumeResult, TickIndex};
use spume_world::World;

use crate::broad::SweepIndex;
use crate::config::{PipelineConfig, WriteBack};
use crate::delta::DeltaBuffer;
use crate::dispatch::{default_worker_count, WorkerPool};
use crate::narrow::CollisionOutcome;
use crate::passes::{
    agent_agent_pass, agent_obstacle_pass, bubble_pass_accumulate, bubble_pass_colored,
};

/// Counters and timing from one pipeline step.
#[derive(Debug, Clone, Copy)]
pub struct TickReport {
    /// Tick this report describes.
    pub tick: TickIndex,
    /// Timestep actually used, after clamping.
    pub dt: Scalar,
    /// Broad-phase candidate pairs for the bubble pass.
    pub bubble_candidates: u32,
    /// Bubble pairs that truly overlapped and were resolved.
    pub bubble_contacts: u32,
    /// Color classes used by the bubble pass (1 in accumulate mode).
    pub bubble_batches: u32,
    /// Agent↔agent contacts resolved.
    pub agent_contacts: u32,
    /// Agent↔obstacle contacts resolved.
    pub obstacle_contacts: u32,
    /// Wall time for the whole step.
    pub elapsed: Duration,
}

/// The collision core's per-tick entry point.
///
/// Created once at process start; buffers are cleared, never
/// reallocated, between ticks.
pub struct CollisionPipeline {
    config: PipelineConfig,
    index: SweepIndex,
    pool: WorkerPool,
    scratch: Vec<DeltaBuffer>,
    outcomes: Vec<Option<CollisionOutcome>>,
}

impl CollisionPipeline {
    /// Builds a pipeline from a validated configuration.
    pub fn new(config: PipelineConfig) -> SpumeResult<Self> {
        config.validate()?;
        let workers = config.worker_threads.unwrap_or_else(default_worker_count);
        let pool = WorkerPool::with_workers(workers)?;
        let scratch = (0..pool.workers()).map(|_| DeltaBuffer::new()).collect();
        Ok(Self {
            index: SweepIndex::with_capacity(config.expected_bubbles),
            pool,
            scratch,
            outcomes: Vec::new(),
            config,
        })
    }

    /// Builds a pipeline with the default configuration.
    pub fn with_defaults() -> SpumeResult<Self> {
        Self::new(PipelineConfig::default())
    }

    /// The active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Worker threads in the pool.
    pub fn workers(&self) -> usize {
        self.pool.workers()
    }

    /// Runs one collision tick: refresh world caches, bubble↔bubble
    /// through the broad phase and the pool, then the two direct agent
    /// passes. The frame time is clamped to `max_dt` first.
    pub fn step(&mut self, world: &mut World, dt: Scalar) -> TickReport {
        let start = Instant::now();
        let dt = dt.clamp(0.0, self.config.max_dt);

        world.begin_tick(dt);

        let bubble = match self.config.write_back {
            WriteBack::Accumulate => bubble_pass_accumulate(
                &mut world.bubbles,
                &mut self.index,
                &self.pool,
                &mut self.scratch,
                dt,
            ),
            WriteBack::ColorClasses => bubble_pass_colored(
                &mut world.bubbles,
                &mut self.index,
                &self.pool,
                &mut self.outcomes,
                dt,
            ),
        };

        let agent_contacts = agent_agent_pass(world, dt);
        let obstacle_contacts = agent_obstacle_pass(world, dt);

        TickReport {
            tick: world.tick,
            dt,
            bubble_candidates: bubble.candidates,
            bubble_contacts: bubble.resolved,
            bubble_batches: bubble.batches,
            agent_contacts,
            obstacle_contacts,
            elapsed: start.elapsed(),
        }
    }
}
