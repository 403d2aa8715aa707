//! Integration tests for spume-contact.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use spume_contact::broad::{CandidatePair, SweepIndex};
use spume_contact::coloring::PairColoring;
use spume_contact::delta::DeltaBuffer;
use spume_contact::dispatch::WorkerPool;
use spume_contact::narrow::{resolve, CircleState};
use spume_contact::{CollisionPipeline, PipelineConfig, WriteBack};
use spume_types::{BodyKind, Vec2};
use spume_world::{BodyArena, World};

const DT: f32 = 1.0 / 60.0;

fn circle(x: f32, y: f32, radius: f32, mass_factor: f32) -> CircleState {
    CircleState {
        pos: Vec2::new(x, y),
        vel: Vec2::ZERO,
        radius,
        mass_factor,
    }
}

fn arena_of(positions: &[(f32, f32)], radius: f32) -> BodyArena {
    let mut arena = BodyArena::new();
    for &(x, y) in positions {
        arena
            .spawn_with_radius(BodyKind::Bubble, Vec2::new(x, y), Vec2::ZERO, radius)
            .unwrap();
    }
    arena
}

fn random_field(count: usize, width: f32, height: f32, radius: f32, seed: u64) -> BodyArena {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut arena = BodyArena::with_capacity(count);
    for _ in 0..count {
        let x = rng.gen_range(0.0..width);
        let y = rng.gen_range(0.0..height);
        arena
            .spawn_with_radius(BodyKind::Bubble, Vec2::new(x, y), Vec2::ZERO, radius)
            .unwrap();
    }
    arena
}

/// Collects every invoked pair across all workers into one sorted vec.
fn invoked_pairs(arena: &BodyArena, workers: usize) -> Vec<(u32, u32)> {
    let pool = WorkerPool::with_workers(workers).unwrap();
    let mut index = SweepIndex::new();
    index.populate(arena);

    let mut scratch: Vec<Vec<(u32, u32)>> = vec![Vec::new(); workers];
    index.for_each_unique_index_pair(&pool, &mut scratch, |seen, i, j| {
        seen.push((i, j));
    });

    let mut all: Vec<(u32, u32)> = scratch.into_iter().flatten().collect();
    all.sort_unstable();
    all
}

// ─── Broad Phase Tests ────────────────────────────────────────

#[test]
fn disjoint_circles_yield_no_candidates() {
    // Radius 1 on a grid with spacing 10: nothing can touch.
    let mut positions = Vec::new();
    for gx in 0..10 {
        for gy in 0..10 {
            positions.push((gx as f32 * 10.0, gy as f32 * 10.0));
        }
    }
    let arena = arena_of(&positions, 1.0);
    assert!(invoked_pairs(&arena, 4).is_empty());
}

#[test]
fn spread_centers_yield_empty_candidate_set() {
    let arena = arena_of(&[(0.0, 0.0), (100.0, 0.0), (1000.0, 0.0)], 5.0);
    let mut index = SweepIndex::new();
    index.populate(&arena);
    assert!(index.collect_candidates().is_empty());
}

#[test]
fn zero_and_one_body_return_immediately() {
    let pool = WorkerPool::with_workers(2).unwrap();
    let mut scratch = vec![0u32; 2];

    let empty = BodyArena::new();
    let mut index = SweepIndex::new();
    index.populate(&empty);
    index.for_each_unique_index_pair(&pool, &mut scratch, |calls, _, _| *calls += 1);
    assert_eq!(scratch.iter().sum::<u32>(), 0);

    let one = arena_of(&[(0.0, 0.0)], 8.0);
    index.clear();
    index.populate(&one);
    index.for_each_unique_index_pair(&pool, &mut scratch, |calls, _, _| *calls += 1);
    assert_eq!(scratch.iter().sum::<u32>(), 0);
}

#[test]
fn intersecting_pairs_invoked_exactly_once_for_all_worker_counts() {
    let arena = random_field(300, 200.0, 100.0, 4.0, 7);

    // Expected truly intersecting pairs, brute force.
    let mut expected = Vec::new();
    for i in 0..arena.len() {
        for j in (i + 1)..arena.len() {
            let d = arena.position(j) - arena.position(i);
            if d.length() < arena.radius[i] + arena.radius[j] {
                expected.push((i as u32, j as u32));
            }
        }
    }
    assert!(!expected.is_empty(), "scene should have real contacts");

    let max_workers = std::thread::available_parallelism().map_or(4, |n| n.get());
    for workers in 1..=max_workers {
        let invoked = invoked_pairs(&arena, workers);

        // No duplicates, no self-pairs, all canonical.
        let mut deduped = invoked.clone();
        deduped.dedup();
        assert_eq!(invoked.len(), deduped.len(), "workers={workers}");
        assert!(invoked.iter().all(|&(i, j)| i < j), "workers={workers}");

        // Every truly intersecting pair is present.
        for pair in &expected {
            assert!(invoked.binary_search(pair).is_ok(), "workers={workers}");
        }
    }
}

#[test]
fn candidate_refinement_drops_vertically_distant_bodies() {
    // Same X interval, far apart in Y: the perpendicular check culls it.
    let arena = arena_of(&[(0.0, 0.0), (0.0, 500.0)], 5.0);
    let mut index = SweepIndex::new();
    index.populate(&arena);
    assert!(index.collect_candidates().is_empty());
}

#[test]
fn index_is_rebuilt_from_scratch_each_tick() {
    let mut arena = arena_of(&[(0.0, 0.0), (15.0, 0.0)], 10.0);
    let mut index = SweepIndex::new();

    index.populate(&arena);
    assert_eq!(index.collect_candidates().len(), 1);

    // Move the bodies apart; a stale index would still report the pair.
    arena.set_position(1, Vec2::new(1000.0, 0.0));
    index.clear();
    index.populate(&arena);
    assert!(index.collect_candidates().is_empty());
}

#[test]
fn candidate_pair_is_canonically_ordered() {
    assert_eq!(CandidatePair::new(9, 2), CandidatePair { a: 2, b: 9 });
    assert_eq!(CandidatePair::new(2, 9), CandidatePair { a: 2, b: 9 });
}

#[test]
fn worker_sweep_parity_on_large_field() {
    // 20k radius-8 bodies in a 2000x1000 world, one seed, many worker
    // counts: the invoked-pair total must not depend on parallelism.
    let arena = random_field(20_000, 2000.0, 1000.0, 8.0, 42);

    let mut counts = Vec::new();
    for workers in [1usize, 2, 4, 8] {
        let pool = WorkerPool::with_workers(workers).unwrap();
        let mut index = SweepIndex::with_capacity(arena.len());
        index.populate(&arena);

        let mut scratch = vec![0u64; workers];
        index.for_each_unique_index_pair(&pool, &mut scratch, |calls, _, _| *calls += 1);

        let total: u64 = scratch.iter().sum();
        assert_eq!(total, index.candidates().len() as u64);
        counts.push(total);
    }

    assert!(counts.windows(2).all(|w| w[0] == w[1]), "{counts:?}");
    assert!(counts[0] > 0);
}

// ─── Narrow Phase Tests ───────────────────────────────────────

#[test]
fn no_overlap_returns_none() {
    let a = circle(0.0, 0.0, 5.0, 1.0);
    let b = circle(20.0, 0.0, 5.0, 1.0);
    assert!(resolve(DT, &a, &b).is_none());
}

#[test]
fn touching_circles_return_none() {
    // overlap == 0 exactly is not a collision.
    let a = circle(0.0, 0.0, 5.0, 1.0);
    let b = circle(10.0, 0.0, 5.0, 1.0);
    assert!(resolve(DT, &a, &b).is_none());
}

#[test]
fn equal_mass_overlap_splits_evenly() {
    // Radius 10 at (0,0) and (15,0): 5 units of overlap.
    let a = circle(0.0, 0.0, 10.0, 1.0);
    let b = circle(15.0, 0.0, 10.0, 1.0);
    let outcome = resolve(DT, &a, &b).unwrap();

    assert!(outcome.disp_a.x < 0.0);
    assert!(outcome.disp_b.x > 0.0);
    assert!((outcome.disp_a.x.abs() + outcome.disp_b.x.abs() - 5.0).abs() < 1e-5);
    assert_eq!(outcome.disp_a.y, 0.0);
    assert_eq!(outcome.disp_b.y, 0.0);
}

#[test]
fn resolver_is_symmetric_for_equal_masses() {
    let a = circle(1.0, 2.0, 10.0, 1.0);
    let mut b = circle(9.0, 8.0, 10.0, 1.0);
    b.vel = Vec2::new(-3.0, -4.0);

    let forward = resolve(DT, &a, &b).unwrap();
    let reverse = resolve(DT, &b, &a).unwrap();

    assert!((forward.disp_a - reverse.disp_b).length() < 1e-6);
    assert!((forward.disp_b - reverse.disp_a).length() < 1e-6);
    assert!((forward.dvel_a - reverse.dvel_b).length() < 1e-6);
    assert!((forward.dvel_b - reverse.dvel_a).length() < 1e-6);
}

#[test]
fn zero_mass_factor_side_receives_nothing() {
    let a = circle(0.0, 0.0, 10.0, 0.0);
    let b = circle(15.0, 0.0, 10.0, 1.0);
    let outcome = resolve(DT, &a, &b).unwrap();

    assert_eq!(outcome.disp_a, Vec2::ZERO);
    assert_eq!(outcome.dvel_a, Vec2::ZERO);
    // The movable side absorbs the entire overlap.
    assert!((outcome.disp_b.x - 5.0).abs() < 1e-5);
}

#[test]
fn both_immovable_returns_none() {
    let a = circle(0.0, 0.0, 10.0, 0.0);
    let b = circle(5.0, 0.0, 10.0, 0.0);
    assert!(resolve(DT, &a, &b).is_none());
}

#[test]
fn heavier_side_moves_less() {
    let light = circle(0.0, 0.0, 10.0, 1.0);
    let heavy = circle(15.0, 0.0, 10.0, 5.0);
    let outcome = resolve(DT, &light, &heavy).unwrap();

    // Inverse masses 1 and 0.2: the light body takes 5/6 of the overlap.
    assert!(outcome.disp_a.x.abs() > outcome.disp_b.x.abs() * 4.0);
    assert!((outcome.disp_a.x.abs() + outcome.disp_b.x.abs() - 5.0).abs() < 1e-5);
}

#[test]
fn coincident_centers_use_substitute_axis() {
    let a = circle(50.0, 50.0, 8.0, 1.0);
    let b = circle(50.0, 50.0, 8.0, 1.0);
    let outcome = resolve(DT, &a, &b).unwrap();

    // Full 16-unit overlap split along the substitute X axis.
    assert!(outcome.disp_a.x.is_finite() && outcome.disp_b.x.is_finite());
    assert!((outcome.disp_a.x + 8.0).abs() < 1e-5);
    assert!((outcome.disp_b.x - 8.0).abs() < 1e-5);
    assert_eq!(outcome.disp_a.y, 0.0);
}

#[test]
fn approaching_velocity_is_damped_never_reversed() {
    let mut a = circle(0.0, 0.0, 10.0, 1.0);
    let mut b = circle(15.0, 0.0, 10.0, 1.0);
    a.vel = Vec2::new(5.0, 0.0);
    b.vel = Vec2::new(-5.0, 0.0);

    let outcome = resolve(DT, &a, &b).unwrap();
    let vn_before = (b.vel - a.vel).x;
    let vn_after = ((b.vel + outcome.dvel_b) - (a.vel + outcome.dvel_a)).x;

    assert!(vn_before < 0.0);
    assert!(vn_after > vn_before, "approach must shrink");
    assert!(vn_after <= 0.0, "approach must not reverse into separation");
}

#[test]
fn separating_velocity_is_untouched() {
    let mut a = circle(0.0, 0.0, 10.0, 1.0);
    let mut b = circle(15.0, 0.0, 10.0, 1.0);
    a.vel = Vec2::new(-5.0, 0.0);
    b.vel = Vec2::new(5.0, 0.0);

    let outcome = resolve(DT, &a, &b).unwrap();
    assert_eq!(outcome.dvel_a, Vec2::ZERO);
    assert_eq!(outcome.dvel_b, Vec2::ZERO);
}

#[test]
fn large_dt_cancels_approach_completely() {
    let mut a = circle(0.0, 0.0, 10.0, 1.0);
    let mut b = circle(15.0, 0.0, 10.0, 1.0);
    a.vel = Vec2::new(5.0, 0.0);
    b.vel = Vec2::new(-5.0, 0.0);

    // dt large enough that rate * dt >= 1: full cancellation, no more.
    let outcome = resolve(1.0, &a, &b).unwrap();
    let vn_after = ((b.vel + outcome.dvel_b) - (a.vel + outcome.dvel_a)).x;
    assert!(vn_after.abs() < 1e-5);
}

#[test]
fn halved_dt_applied_twice_matches_net_displacement() {
    let run = |dt: f32, steps: u32| -> (Vec2, Vec2) {
        let mut a = circle(0.0, 0.0, 10.0, 1.0);
        let mut b = circle(15.0, 0.0, 10.0, 1.0);
        for _ in 0..steps {
            if let Some(outcome) = resolve(dt, &a, &b) {
                a.pos += outcome.disp_a;
                b.pos += outcome.disp_b;
                a.vel += outcome.dvel_a;
                b.vel += outcome.dvel_b;
            }
        }
        (a.pos, b.pos)
    };

    let (a_full, b_full) = run(DT, 1);
    let (a_half, b_half) = run(DT / 2.0, 2);

    assert!((a_full - a_half).length() < 1e-4);
    assert!((b_full - b_half).length() < 1e-4);
}

#[test]
fn circle_state_from_arena_derives_mass_factor() {
    let mut arena = BodyArena::new();
    arena.spawn(BodyKind::Volatile, Vec2::new(1.0, 2.0), Vec2::ZERO);
    arena.spawn(BodyKind::Obstacle, Vec2::ZERO, Vec2::ZERO);

    let volatile = CircleState::from_arena(&arena, 0);
    assert!((volatile.mass_factor - 5.0).abs() < 1e-4);

    let obstacle = CircleState::from_arena(&arena, 1);
    assert_eq!(obstacle.mass_factor, 0.0);

    let held = volatile.with_mass_factor(0.0);
    assert_eq!(held.mass_factor, 0.0);
}

// ─── Coloring Tests ───────────────────────────────────────────

#[test]
fn color_classes_share_no_body() {
    let arena = random_field(500, 300.0, 150.0, 6.0, 11);
    let mut index = SweepIndex::new();
    index.populate(&arena);
    index.collect_candidates();

    let (sorted, offsets) = PairColoring::color_pairs(index.candidates(), arena.len());

    for window in offsets.windows(2) {
        let class = &sorted[window[0]..window[1]];
        let mut seen = std::collections::HashSet::new();
        for pair in class {
            assert!(seen.insert(pair.a), "body {} repeated in class", pair.a);
            assert!(seen.insert(pair.b), "body {} repeated in class", pair.b);
        }
    }
}

#[test]
fn color_classes_cover_all_pairs_exactly_once() {
    let arena = random_field(400, 250.0, 125.0, 6.0, 13);
    let mut index = SweepIndex::new();
    index.populate(&arena);
    index.collect_candidates();

    let (sorted, offsets) = PairColoring::color_pairs(index.candidates(), arena.len());

    assert_eq!(sorted.len(), index.candidates().len());
    assert_eq!(*offsets.last().unwrap(), sorted.len());

    let mut original: Vec<CandidatePair> = index.candidates().to_vec();
    let mut recovered = sorted.clone();
    original.sort_unstable_by_key(|p| (p.a, p.b));
    recovered.sort_unstable_by_key(|p| (p.a, p.b));
    assert_eq!(original, recovered);
}

#[test]
fn coloring_empty_input() {
    let (sorted, offsets) = PairColoring::color_pairs(&[], 10);
    assert!(sorted.is_empty());
    assert_eq!(offsets, vec![0]);
}

// ─── Write-Back Tests ─────────────────────────────────────────

#[test]
fn delta_buffer_merges_and_clears() {
    let mut arena = arena_of(&[(0.0, 0.0), (15.0, 0.0)], 10.0);
    let a = CircleState::from_arena(&arena, 0);
    let b = CircleState::from_arena(&arena, 1);
    let outcome = resolve(DT, &a, &b).unwrap();

    let mut buffer = DeltaBuffer::new();
    buffer.add_pair(0, 1, &outcome);
    assert_eq!(buffer.resolved_pairs(), 1);

    buffer.merge_into(&mut arena);
    assert!(buffer.is_empty());
    assert_eq!(buffer.resolved_pairs(), 0);

    // Fully separated after the merge.
    let gap = arena.position(1) - arena.position(0);
    assert!((gap.length() - 20.0).abs() < 1e-4);
}

#[test]
fn accumulate_and_colored_passes_agree_on_simple_scene() {
    let build = || {
        let mut world = World::with_bubble_capacity(16);
        world
            .bubbles
            .spawn_with_radius(BodyKind::Bubble, Vec2::new(0.0, 0.0), Vec2::ZERO, 10.0)
            .unwrap();
        world
            .bubbles
            .spawn_with_radius(BodyKind::Bubble, Vec2::new(15.0, 0.0), Vec2::ZERO, 10.0)
            .unwrap();
        world
    };

    let mut accumulate_world = build();
    let mut colored_world = build();

    let mut accumulate = CollisionPipeline::new(PipelineConfig {
        worker_threads: Some(2),
        write_back: WriteBack::Accumulate,
        ..PipelineConfig::default()
    })
    .unwrap();
    let mut colored = CollisionPipeline::new(PipelineConfig {
        worker_threads: Some(2),
        write_back: WriteBack::ColorClasses,
        ..PipelineConfig::default()
    })
    .unwrap();

    let report_a = accumulate.step(&mut accumulate_world, DT);
    let report_c = colored.step(&mut colored_world, DT);

    assert_eq!(report_a.bubble_contacts, 1);
    assert_eq!(report_c.bubble_contacts, 1);

    // A single isolated pair gets the identical correction either way.
    let gap_a = accumulate_world.bubbles.position(1) - accumulate_world.bubbles.position(0);
    let gap_c = colored_world.bubbles.position(1) - colored_world.bubbles.position(0);
    assert!((gap_a - gap_c).length() < 1e-5);
    assert!((gap_a.length() - 20.0).abs() < 1e-4);
}

// ─── Pipeline Tests ───────────────────────────────────────────

#[test]
fn pipeline_clamps_dt() {
    let mut world = World::with_bubble_capacity(4);
    let mut pipeline = CollisionPipeline::with_defaults().unwrap();
    let report = pipeline.step(&mut world, 10.0);
    assert_eq!(report.dt, pipeline.config().max_dt);
}

#[test]
fn obstacles_never_move() {
    let mut world = World::with_bubble_capacity(4);
    let obstacle_pos = Vec2::new(10.0, 0.0);
    world
        .agents
        .spawn(BodyKind::Agent, Vec2::ZERO, Vec2::new(50.0, 0.0));
    world
        .obstacles
        .spawn_with_radius(BodyKind::Obstacle, obstacle_pos, Vec2::ZERO, 20.0)
        .unwrap();

    let mut pipeline = CollisionPipeline::with_defaults().unwrap();
    for _ in 0..5 {
        pipeline.step(&mut world, DT);
    }

    assert_eq!(world.obstacles.position(0), obstacle_pos);
    assert_eq!(world.obstacles.velocity(0), Vec2::ZERO);
    // The agent was pushed out of the obstacle.
    let gap = world.agents.position(0) - obstacle_pos;
    assert!(gap.length() >= 20.0 + world.agents.radius[0] - 1e-3);
}

#[test]
fn held_agent_pushes_without_being_pushed() {
    let mut world = World::with_bubble_capacity(4);
    let held_pos = Vec2::new(0.0, 0.0);
    let held = world.agents.spawn(BodyKind::Agent, held_pos, Vec2::ZERO);
    world
        .agents
        .spawn(BodyKind::Agent, Vec2::new(30.0, 0.0), Vec2::ZERO);
    world.set_held_agent(Some(held));

    let mut pipeline = CollisionPipeline::with_defaults().unwrap();
    let report = pipeline.step(&mut world, DT);

    assert_eq!(report.agent_contacts, 1);
    assert_eq!(world.agents.position(0), held_pos);
    // The partner absorbed the whole 18-unit overlap (radius 24 each).
    assert!((world.agents.pos_x[1] - 48.0).abs() < 1e-3);
}

#[test]
fn bubble_pass_separates_dense_cluster() {
    let mut world = World::with_bubble_capacity(64);
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..50 {
        let x = rng.gen_range(0.0..40.0);
        let y = rng.gen_range(0.0..40.0);
        world
            .bubbles
            .spawn(BodyKind::Bubble, Vec2::new(x, y), Vec2::ZERO);
    }

    let mut pipeline = CollisionPipeline::with_defaults().unwrap();
    let first = pipeline.step(&mut world, DT);
    assert!(first.bubble_contacts > 0);

    // Iterating the pass settles the cluster: contacts shrink over time.
    let mut last = first.bubble_contacts;
    for _ in 0..200 {
        last = pipeline.step(&mut world, DT).bubble_contacts;
        if last == 0 {
            break;
        }
    }
    assert!(last < first.bubble_contacts);
    world.validate().unwrap();
}

#[test]
fn pipeline_reports_tick_and_counts() {
    let mut world = World::with_bubble_capacity(8);
    world
        .bubbles
        .spawn_with_radius(BodyKind::Bubble, Vec2::new(0.0, 0.0), Vec2::ZERO, 10.0)
        .unwrap();
    world
        .bubbles
        .spawn_with_radius(BodyKind::Bubble, Vec2::new(15.0, 0.0), Vec2::ZERO, 10.0)
        .unwrap();

    let mut pipeline = CollisionPipeline::with_defaults().unwrap();
    let report = pipeline.step(&mut world, DT);

    assert_eq!(report.tick.0, 1);
    assert_eq!(report.bubble_candidates, 1);
    assert_eq!(report.bubble_contacts, 1);
    assert_eq!(report.agent_contacts, 0);
    assert_eq!(report.obstacle_contacts, 0);
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn default_config_is_valid() {
    assert!(PipelineConfig::default().validate().is_ok());
}

#[test]
fn config_rejects_bad_values() {
    let mut config = PipelineConfig::default();
    config.max_dt = 0.0;
    assert!(config.validate().is_err());

    config.max_dt = f32::NAN;
    assert!(config.validate().is_err());

    config.max_dt = 2.0;
    assert!(config.validate().is_err());

    config = PipelineConfig::default();
    config.worker_threads = Some(0);
    assert!(config.validate().is_err());
}

#[test]
fn write_back_serializes_as_snake_case() {
    let json = serde_json::to_string(&WriteBack::ColorClasses).unwrap();
    assert_eq!(json, "\"color_classes\"");
}

#[test]
fn worker_pool_clamps_to_one() {
    let pool = WorkerPool::with_workers(0).unwrap();
    assert_eq!(pool.workers(), 1);
}
