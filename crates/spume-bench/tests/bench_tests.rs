//! Integration tests for spume-bench.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use spume_bench::metrics::BenchmarkMetrics;
use spume_bench::runner::BenchmarkRunner;
use spume_bench::scenarios::{Scenario, ScenarioKind};
use spume_telemetry::bus::EventBus;
use spume_telemetry::events::TickEvent;
use spume_telemetry::sinks::EventSink;
use spume_types::BodyIndex;

/// Sink that counts deliveries through a shared handle, so tests can
/// see through the `Box<dyn EventSink>` the bus owns.
struct CountingSink {
    count: Arc<AtomicUsize>,
}

impl EventSink for CountingSink {
    fn handle(&mut self, _event: &TickEvent) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    fn name(&self) -> &str {
        "counting_sink"
    }
}

// ─── Scenario Tests ───────────────────────────────────────────

#[test]
fn drift_field_setup() {
    let s = Scenario::drift_field();
    assert_eq!(s.kind, ScenarioKind::DriftField);
    assert_eq!(s.bubbles, 20_000);
    assert_eq!(s.agents, 0);
    assert_eq!(s.ticks, 120);

    let world = s.build_world();
    assert_eq!(world.bubbles.len(), 20_000);
    // Every fiftieth bubble is volatile, heavier than the rest.
    assert!(world.bubbles.inv_mass[49] < world.bubbles.inv_mass[0]);
}

#[test]
fn obstacle_gauntlet_setup() {
    let s = Scenario::obstacle_gauntlet();
    let mut world = s.build_world();
    assert_eq!(world.agents.len(), 12);
    assert_eq!(world.obstacles.len(), 8);

    // Obstacles never move.
    assert!(world.obstacles.inv_mass.iter().all(|&w| w == 0.0));

    // The first agent spawned is the beacon.
    world.refresh_caches();
    assert_eq!(world.beacon(), Some(BodyIndex(0)));
}

#[test]
fn world_rebuild_is_deterministic() {
    let s = Scenario::dense_cluster();
    let a = s.build_world();
    let b = s.build_world();
    assert_eq!(a.bubbles.pos_x, b.bubbles.pos_x);
    assert_eq!(a.bubbles.vel_y, b.bubbles.vel_y);
}

#[test]
fn all_scenarios() {
    assert_eq!(ScenarioKind::all().len(), 3);
    let names: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
    assert_eq!(names, ["drift_field", "dense_cluster", "obstacle_gauntlet"]);
}

// ─── Runner Tests ─────────────────────────────────────────────

fn short_cluster() -> Scenario {
    let mut s = Scenario::dense_cluster();
    s.bubbles = 300;
    s.ticks = 5;
    s
}

#[test]
fn run_short_cluster() {
    let scenario = short_cluster();
    let metrics = BenchmarkRunner::run(&scenario).unwrap();

    assert_eq!(metrics.scenario, "dense_cluster");
    assert_eq!(metrics.ticks, 5);
    assert_eq!(metrics.body_count, 300);
    assert!(metrics.total_wall_time > 0.0);
    // 300 bubbles in 400x400 must produce contacts.
    assert!(metrics.avg_contacts > 0.0);
}

#[test]
fn run_emits_telemetry() {
    let count = Arc::new(AtomicUsize::new(0));
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(CountingSink {
        count: Arc::clone(&count),
    }));

    let scenario = short_cluster();
    BenchmarkRunner::run_with_bus(&scenario, Some(&mut bus)).unwrap();

    // Four events per tick plus the final energy event.
    assert_eq!(count.load(Ordering::Relaxed), 4 * 5 + 1);
}

#[test]
fn run_all_scenarios() {
    // Use minimal populations and ticks for speed
    for &kind in ScenarioKind::all() {
        let mut scenario = Scenario::from_kind(kind);
        scenario.bubbles = 200;
        scenario.ticks = 3;
        let metrics = BenchmarkRunner::run(&scenario).unwrap();
        assert_eq!(metrics.scenario, kind.name());
        assert!(metrics.total_wall_time >= 0.0);
    }
}

#[test]
fn worker_sweep_totals_agree() {
    let mut scenario = Scenario::dense_cluster();
    scenario.bubbles = 400;
    scenario.ticks = 4;

    let samples = BenchmarkRunner::run_worker_sweep(&scenario, &[1, 2]).unwrap();
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].total_candidates, samples[1].total_candidates);
    assert_eq!(samples[0].total_contacts, samples[1].total_contacts);
    assert!(samples[0].total_contacts > 0);
}

// ─── Metrics Tests ────────────────────────────────────────────

#[test]
fn metrics_csv_output() {
    let metrics = BenchmarkMetrics {
        scenario: "test".into(),
        body_count: 20_000,
        workers: 4,
        ticks: 100,
        total_wall_time: 1.5,
        avg_tick_time: 0.015,
        min_tick_time: 0.01,
        max_tick_time: 0.02,
        avg_candidates: 61_450.0,
        avg_contacts: 12_007.0,
        final_kinetic_energy: 1e-5,
    };

    let csv_row = metrics.to_csv_row();
    assert!(csv_row.contains("test"));
    assert!(csv_row.contains("20000"));
    assert!(csv_row.contains("61450.0"));
}

#[test]
fn metrics_csv_multi() {
    let m1 = BenchmarkMetrics {
        scenario: "a".into(),
        body_count: 10,
        workers: 1,
        ticks: 10,
        total_wall_time: 1.0,
        avg_tick_time: 0.1,
        min_tick_time: 0.05,
        max_tick_time: 0.15,
        avg_candidates: 0.0,
        avg_contacts: 0.0,
        final_kinetic_energy: 0.0,
    };
    let csv = BenchmarkMetrics::to_csv(&[m1]);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2); // Header + 1 data row
    assert!(lines[0].contains("scenario"));
}

#[test]
fn metrics_json_round_trip() {
    let metrics = BenchmarkMetrics {
        scenario: "test".into(),
        body_count: 100,
        workers: 2,
        ticks: 10,
        total_wall_time: 1.0,
        avg_tick_time: 0.1,
        min_tick_time: 0.05,
        max_tick_time: 0.15,
        avg_candidates: 40.0,
        avg_contacts: 12.0,
        final_kinetic_energy: 1e-3,
    };
    let json = serde_json::to_string(&metrics).unwrap();
    let recovered: BenchmarkMetrics = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered.ticks, 10);
}
