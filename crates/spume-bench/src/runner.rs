//! Benchmark runner — executes scenarios against the collision pipeline
//! and collects metrics.

use std::time::Instant;

use spume_contact::{CollisionPipeline, PipelineConfig, TickReport};
use spume_telemetry::bus::EventBus;
use spume_telemetry::events::{TickEvent, TickEventKind};
use spume_types::SpumeResult;
use spume_world::World;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::Scenario;

/// One data point from a worker-count sweep.
///
/// Candidate and contact totals must agree across all samples of one
/// sweep; the wall time is what varies.
#[derive(Debug, Clone, Copy)]
pub struct WorkerSweepSample {
    /// Worker threads in the pool for this run.
    pub workers: usize,
    /// Broad-phase candidates summed over every tick.
    pub total_candidates: u64,
    /// Resolved bubble contacts summed over every tick.
    pub total_contacts: u64,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
}

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Run a single scenario.
    ///
    /// Returns metrics for the completed run.
    pub fn run(scenario: &Scenario) -> SpumeResult<BenchmarkMetrics> {
        Self::run_with_bus(scenario, None)
    }

    /// Run a single scenario, emitting telemetry to `bus` if given.
    ///
    /// Per tick: `TickBegin`, `BroadPhase`, `Contacts`, `TickEnd`; a
    /// final `Energy` event after the last tick. The bus is flushed once
    /// at the end, not per tick.
    pub fn run_with_bus(
        scenario: &Scenario,
        mut bus: Option<&mut EventBus>,
    ) -> SpumeResult<BenchmarkMetrics> {
        let mut world = scenario.build_world();
        let mut pipeline = CollisionPipeline::new(scenario.config.clone())?;

        let mut tick_times: Vec<f64> = Vec::with_capacity(scenario.ticks as usize);
        let mut total_candidates: u64 = 0;
        let mut total_contacts: u64 = 0;

        let total_start = Instant::now();

        for _ in 0..scenario.ticks {
            // Drift, then resolve what the drift caused.
            world.bubbles.integrate(scenario.dt);
            world.agents.integrate(scenario.dt);

            if let Some(bus) = bus.as_deref_mut() {
                // The tick index advances inside step; the begin event
                // carries the index this step will run under.
                bus.emit(TickEvent::new(
                    world.tick.0 + 1,
                    TickEventKind::TickBegin {
                        sim_time: world.sim_time,
                    },
                ));
            }

            let report = pipeline.step(&mut world, scenario.dt);

            if let Some(bus) = bus.as_deref_mut() {
                Self::emit_results(bus, &world, &report);
            }

            tick_times.push(report.elapsed.as_secs_f64());
            total_candidates += report.bubble_candidates as u64;
            total_contacts += report.bubble_contacts as u64;
        }

        let total_wall_time = total_start.elapsed().as_secs_f64();
        let final_ke = world.bubbles.kinetic_energy();

        if let Some(bus) = bus.as_deref_mut() {
            bus.emit(TickEvent::new(
                world.tick.0,
                TickEventKind::Energy { kinetic: final_ke },
            ));
            bus.flush();
        }

        let avg_tick = if tick_times.is_empty() {
            0.0
        } else {
            tick_times.iter().sum::<f64>() / tick_times.len() as f64
        };
        let min_tick = tick_times.iter().copied().fold(f64::MAX, f64::min);
        let max_tick = tick_times.iter().copied().fold(0.0, f64::max);
        let ticks = scenario.ticks.max(1) as f64;

        Ok(BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            body_count: world.body_count(),
            workers: pipeline.workers(),
            ticks: scenario.ticks,
            total_wall_time,
            avg_tick_time: avg_tick,
            min_tick_time: min_tick,
            max_tick_time: max_tick,
            avg_candidates: total_candidates as f64 / ticks,
            avg_contacts: total_contacts as f64 / ticks,
            final_kinetic_energy: final_ke,
        })
    }

    fn emit_results(bus: &EventBus, world: &World, report: &TickReport) {
        let tick = report.tick.0;
        bus.emit(TickEvent::new(
            tick,
            TickEventKind::BroadPhase {
                bodies: world.bubbles.len() as u32,
                candidates: report.bubble_candidates,
            },
        ));
        bus.emit(TickEvent::new(
            tick,
            TickEventKind::Contacts {
                bubble_contacts: report.bubble_contacts,
                agent_contacts: report.agent_contacts,
                obstacle_contacts: report.obstacle_contacts,
                batches: report.bubble_batches,
            },
        ));
        bus.emit(TickEvent::new(
            tick,
            TickEventKind::TickEnd {
                wall_time: report.elapsed.as_secs_f64(),
            },
        ));
    }

    /// Run all scenarios and return metrics for each.
    pub fn run_all() -> SpumeResult<Vec<BenchmarkMetrics>> {
        use crate::scenarios::ScenarioKind;
        let mut results = Vec::new();
        for &kind in ScenarioKind::all() {
            let scenario = Scenario::from_kind(kind);
            let metrics = Self::run(&scenario)?;
            results.push(metrics);
        }
        Ok(results)
    }

    /// Run the scenario once per worker count, each run on a fresh world
    /// rebuilt from the scenario seed.
    ///
    /// Both write-back strategies keep the correction order independent
    /// of the chunking, so candidate and contact totals must match
    /// exactly across the sweep even over many ticks.
    pub fn run_worker_sweep(
        scenario: &Scenario,
        worker_counts: &[usize],
    ) -> SpumeResult<Vec<WorkerSweepSample>> {
        let mut samples = Vec::with_capacity(worker_counts.len());
        for &workers in worker_counts {
            let config = PipelineConfig {
                worker_threads: Some(workers),
                ..scenario.config.clone()
            };
            let mut world = scenario.build_world();
            let mut pipeline = CollisionPipeline::new(config)?;

            let mut total_candidates: u64 = 0;
            let mut total_contacts: u64 = 0;
            let start = Instant::now();

            for _ in 0..scenario.ticks {
                world.bubbles.integrate(scenario.dt);
                world.agents.integrate(scenario.dt);
                let report = pipeline.step(&mut world, scenario.dt);
                total_candidates += report.bubble_candidates as u64;
                total_contacts += report.bubble_contacts as u64;
            }

            samples.push(WorkerSweepSample {
                workers,
                total_candidates,
                total_contacts,
                total_wall_time: start.elapsed().as_secs_f64(),
            });
        }
        Ok(samples)
    }
}
