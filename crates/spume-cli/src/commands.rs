//! CLI command implementations.

use spume_bench::metrics::BenchmarkMetrics;
use spume_bench::runner::BenchmarkRunner;
use spume_bench::scenarios::{Scenario, ScenarioKind};
use spume_contact::PipelineConfig;
use spume_telemetry::bus::EventBus;
use spume_telemetry::sinks::TracingSink;
use spume_world::snapshot::WorldSnapshot;

fn parse_kind(name: &str) -> Result<ScenarioKind, Box<dyn std::error::Error>> {
    match name {
        "drift_field" => Ok(ScenarioKind::DriftField),
        "dense_cluster" => Ok(ScenarioKind::DenseCluster),
        "obstacle_gauntlet" => Ok(ScenarioKind::ObstacleGauntlet),
        other => {
            eprintln!("Unknown scenario: {other}");
            eprintln!("Available: drift_field, dense_cluster, obstacle_gauntlet");
            Err("Unknown scenario".into())
        }
    }
}

/// Run benchmark suite.
pub fn bench(
    scenario_name: &str,
    ticks: Option<u32>,
    workers: Option<usize>,
    output_path: Option<&str>,
    trace: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Spume Benchmark Suite");
    println!("═════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        vec![parse_kind(scenario_name)?]
    };

    let mut bus = if trace {
        tracing_subscriber::fmt::init();
        let mut bus = EventBus::new();
        bus.add_sink(Box::new(TracingSink::new(tracing::Level::INFO)));
        Some(bus)
    } else {
        None
    };

    let mut all_metrics = Vec::new();

    for &kind in &scenarios {
        let mut scenario = Scenario::from_kind(kind);
        if let Some(ticks) = ticks {
            scenario = scenario.with_ticks(ticks);
        }
        if let Some(workers) = workers {
            let config = PipelineConfig {
                worker_threads: Some(workers),
                ..scenario.config.clone()
            };
            scenario = scenario.with_config(config);
        }

        println!(
            "Running: {} ({} bubbles, {} agents, {} obstacles, {} ticks)",
            kind.name(),
            scenario.bubbles,
            scenario.agents,
            scenario.obstacles,
            scenario.ticks,
        );

        let metrics = BenchmarkRunner::run_with_bus(&scenario, bus.as_mut())
            .map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Wall time:       {:.3}s", metrics.total_wall_time);
        println!("  Avg tick:        {:.3}ms", metrics.avg_tick_time * 1000.0);
        println!("  Candidates/tick: {:.0}", metrics.avg_candidates);
        println!("  Contacts/tick:   {:.0}", metrics.avg_contacts);
        println!("  Final KE:        {:.6e}", metrics.final_kinetic_energy);
        println!();

        all_metrics.push(metrics);
    }

    if let Some(bus) = bus.as_mut() {
        bus.finalize();
    }

    // Output CSV or JSON
    if let Some(path) = output_path {
        let body = if path.ends_with(".json") {
            serde_json::to_string_pretty(&all_metrics)?
        } else {
            BenchmarkMetrics::to_csv(&all_metrics)
        };
        std::fs::write(path, &body)?;
        println!("Wrote results to {path}");
    } else {
        println!("{}", BenchmarkMetrics::to_csv(&all_metrics));
    }

    Ok(())
}

/// Run one scenario at each worker count and compare pair totals.
pub fn sweep(
    scenario_name: &str,
    ticks: Option<u32>,
    workers: &[usize],
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Spume Worker Sweep");
    println!("──────────────────");
    println!();

    let kind = parse_kind(scenario_name)?;
    let mut scenario = Scenario::from_kind(kind);
    if let Some(ticks) = ticks {
        scenario = scenario.with_ticks(ticks);
    }

    println!(
        "Scenario: {} ({} bubbles, {} ticks)",
        kind.name(),
        scenario.bubbles,
        scenario.ticks
    );
    println!();

    let samples = BenchmarkRunner::run_worker_sweep(&scenario, workers)
        .map_err(|e| format!("Sweep failed: {e}"))?;

    if samples.is_empty() {
        return Err("no worker counts given".into());
    }

    println!(
        "{:>8}  {:>12}  {:>12}  {:>10}",
        "workers", "candidates", "contacts", "wall (s)"
    );
    for s in &samples {
        println!(
            "{:>8}  {:>12}  {:>12}  {:>10.3}",
            s.workers, s.total_candidates, s.total_contacts, s.total_wall_time
        );
    }
    println!();

    let first = &samples[0];
    let consistent = samples.iter().all(|s| {
        s.total_candidates == first.total_candidates && s.total_contacts == first.total_contacts
    });

    if consistent {
        println!("✅ Pair totals agree across all worker counts.");
        Ok(())
    } else {
        Err("pair totals diverge across worker counts".into())
    }
}

/// Inspect a world snapshot.
pub fn inspect(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Spume Snapshot Inspector");
    println!("────────────────────────");
    println!();

    let data = std::fs::read(path)?;
    let snapshot = WorldSnapshot::from_bytes(&data)
        .map_err(|e| format!("Failed to read snapshot: {e}"))?;

    println!("tick:       {}", snapshot.tick);
    println!("sim time:   {:.4}s", snapshot.sim_time);
    println!("bubbles:    {}", snapshot.bubbles.body_count());
    println!("agents:     {}", snapshot.agents.body_count());
    println!("obstacles:  {}", snapshot.obstacles.body_count());

    if !snapshot.bubbles.positions.is_empty() {
        let (min_x, max_x) = axis_range(&snapshot.bubbles.positions, 0);
        let (min_y, max_y) = axis_range(&snapshot.bubbles.positions, 1);
        println!("x range:    [{min_x:.2}, {max_x:.2}]");
        println!("y range:    [{min_y:.2}, {max_y:.2}]");
    }

    Ok(())
}

/// Min and max of one axis in a flattened `[x0, y0, x1, y1, ...]` array.
fn axis_range(positions: &[f32], offset: usize) -> (f32, f32) {
    positions
        .iter()
        .enumerate()
        .filter(|(i, _)| i % 2 == offset)
        .map(|(_, v)| *v)
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}

/// Validate a pipeline config or snapshot.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Spume Validator");
    println!("───────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Checking config: {path}");
        let content = std::fs::read_to_string(path)?;
        let config: PipelineConfig = toml::from_str(&content)?;
        config.validate()?;
        println!("✅ Config OK.");
        println!("  max_dt:           {}", config.max_dt);
        match config.worker_threads {
            Some(n) => println!("  worker_threads:   {n}"),
            None => println!("  worker_threads:   auto"),
        }
        println!("  write_back:       {:?}", config.write_back);
        println!("  expected_bubbles: {}", config.expected_bubbles);
    } else {
        println!("Checking snapshot: {path}");
        let data = std::fs::read(path)?;
        let world = WorldSnapshot::from_bytes(&data)
            .map_err(|e| format!("Failed to read snapshot: {e}"))?
            .restore()?;
        match world.validate() {
            Ok(()) => println!(
                "✅ Snapshot is valid ({} bubbles, {} agents, {} obstacles).",
                world.bubbles.len(),
                world.agents.len(),
                world.obstacles.len()
            ),
            Err(e) => println!("❌ Snapshot validation failed: {e}"),
        }
    }

    Ok(())
}
