//! Integration tests for wator-tick

use rand::SeedableRng;
use rand::rngs::StdRng;
use wator_tick::{Simulation, TickCoordinator};
use wator_world::{Cell, Pos, WatorConfig, WorldState};

// ============================================================================
// Helpers
// ============================================================================

fn scenario_config(width: usize, height: usize) -> WatorConfig {
    WatorConfig {
        grid_width: width,
        grid_height: height,
        initial_fish_count: 0,
        initial_shark_count: 0,
        fish_breed_ticks: 3,
        shark_breed_ticks: 8,
        shark_starve_ticks: 3,
        worker_count: 1,
        seed: Some(1),
    }
}

fn run_one_tick(config: &WatorConfig, world: &mut WorldState, seed: u64) {
    let mut coordinator = TickCoordinator::new(config, StdRng::seed_from_u64(seed)).unwrap();
    coordinator.advance_one_tick(world);
}

fn crowded_config(workers: usize) -> WatorConfig {
    WatorConfig {
        grid_width: 60,
        grid_height: 45,
        initial_fish_count: 900,
        initial_shark_count: 250,
        worker_count: workers,
        seed: Some(7),
        ..WatorConfig::default()
    }
}

// ============================================================================
// Whole-grid properties
// ============================================================================

/// Timers far beyond the run length, so nothing breeds or starves.
fn immortal_config(fish: usize, sharks: usize, workers: usize) -> WatorConfig {
    WatorConfig {
        grid_width: 30,
        grid_height: 20,
        initial_fish_count: fish,
        initial_shark_count: sharks,
        fish_breed_ticks: 1_000_000,
        shark_breed_ticks: 1_000_000,
        shark_starve_ticks: 1_000_000,
        worker_count: workers,
        seed: Some(11),
    }
}

const CONTENDED_WORKERS: [usize; 7] = [1, 2, 3, 4, 6, 8, 16];

#[test]
fn test_fish_are_conserved_without_breeding() {
    for workers in CONTENDED_WORKERS {
        let mut simulation = Simulation::new(&immortal_config(300, 0, workers)).unwrap();

        for tick in 0..200 {
            simulation.advance_one_tick();
            let census = simulation.population();
            assert_eq!(census.fish, 300, "{workers} workers, tick {tick}");
            assert_eq!(census.sharks, 0);
        }
    }
}

#[test]
fn test_sharks_are_conserved_without_breeding_or_starving() {
    for workers in CONTENDED_WORKERS {
        let mut simulation = Simulation::new(&immortal_config(0, 300, workers)).unwrap();

        for tick in 0..200 {
            simulation.advance_one_tick();
            assert_eq!(simulation.population().sharks, 300, "{workers} workers, tick {tick}");
        }
    }
}

#[test]
fn test_each_fish_is_eaten_at_most_once() {
    for workers in CONTENDED_WORKERS {
        let mut simulation = Simulation::new(&immortal_config(350, 150, workers)).unwrap();

        for tick in 0..100 {
            let before = simulation.population().fish;
            let report = simulation.advance_one_tick();
            let census = simulation.population();

            assert_eq!(census.sharks, 150, "{workers} workers, tick {tick}");
            assert_eq!(before - census.fish, report.fish_eaten, "{workers} workers, tick {tick}");
            assert_eq!(report.born, 0);
            assert_eq!(report.starved, 0);
        }
    }
}

#[test]
fn test_timers_stay_within_configured_bounds() {
    let config = crowded_config(4);
    let mut simulation = Simulation::new(&config).unwrap();

    for _ in 0..40 {
        simulation.advance_one_tick();
        for (pos, cell) in simulation.world().current().iter() {
            match cell {
                Cell::Empty => {}
                Cell::Fish { breed } => assert!(breed <= config.fish_breed_ticks, "{pos:?}"),
                Cell::Shark { breed, starve } => {
                    assert!(breed <= config.shark_breed_ticks, "{pos:?}");
                    assert!((1..=config.shark_starve_ticks).contains(&starve), "{pos:?}");
                }
            }
        }
    }
}

#[test]
fn test_single_worker_is_reproducible() {
    let config = WatorConfig {
        worker_count: 1,
        ..crowded_config(1)
    };
    let mut a = Simulation::new(&config).unwrap();
    let mut b = Simulation::new(&config).unwrap();
    assert_eq!(a.world().current(), b.world().current());

    for tick in 0..30 {
        let report_a = a.advance_one_tick();
        let report_b = b.advance_one_tick();
        assert_eq!(report_a, report_b, "tick {tick}");
        assert_eq!(a.world().current(), b.world().current(), "tick {tick}");
    }
    assert_eq!(a.tick(), 30);
}

#[test]
fn test_many_workers_on_narrow_grid() {
    // workers are clamped to the grid width, tiles past the edge are dropped
    let config = WatorConfig {
        grid_width: 3,
        grid_height: 20,
        initial_fish_count: 20,
        initial_shark_count: 5,
        worker_count: 16,
        seed: Some(3),
        ..WatorConfig::default()
    };
    let mut simulation = Simulation::new(&config).unwrap();

    for _ in 0..20 {
        simulation.advance_one_tick();
        assert_eq!(simulation.population().total(), 60);
    }
}

#[test]
fn test_empty_world_stays_empty() {
    let config = scenario_config(8, 8);
    let mut world = WorldState::new(8, 8);
    run_one_tick(&config, &mut world, 1);
    assert_eq!(world.current().population().empty, 64);
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_breeding_fish_leaves_newborn() {
    let config = scenario_config(4, 4);

    for seed in 0..8 {
        let mut world = WorldState::new(4, 4);
        world.set(Pos::new(0, 0), Cell::fish(1));

        run_one_tick(&config, &mut world, seed);

        assert_eq!(world.get(Pos::new(0, 0)), Cell::fish(3), "seed {seed}");

        let neighbors = [Pos::new(3, 0), Pos::new(1, 0), Pos::new(0, 3), Pos::new(0, 1)];
        let moved: Vec<_> = neighbors
            .iter()
            .map(|&pos| world.get(pos))
            .filter(|cell| !cell.is_empty())
            .collect();
        assert_eq!(moved, vec![Cell::fish(3)], "seed {seed}");
        assert_eq!(world.current().population().fish, 2);
    }
}

#[test]
fn test_shark_eats_neighbor_fish() {
    let config = scenario_config(4, 4);

    for seed in 0..8 {
        let mut world = WorldState::new(4, 4);
        world.set(Pos::new(1, 1), Cell::shark(5, 1));
        world.set(Pos::new(1, 2), Cell::fish(3));

        run_one_tick(&config, &mut world, seed);

        assert_eq!(world.get(Pos::new(1, 2)), Cell::shark(4, 3), "seed {seed}");
        assert_eq!(world.get(Pos::new(1, 1)), Cell::Empty, "seed {seed}");
        assert_eq!(world.current().population().fish, 0);
        assert_eq!(world.current().population().sharks, 1);
    }
}

#[test]
fn test_boxed_in_starving_shark_dies() {
    let config = scenario_config(4, 4);
    let center = Pos::new(1, 1);

    for seed in 0..8 {
        let mut world = WorldState::new(4, 4);
        world.set(center, Cell::shark(5, 1));
        for pos in [Pos::new(0, 1), Pos::new(2, 1), Pos::new(1, 0), Pos::new(1, 2)] {
            world.set(pos, Cell::shark(5, 3));
        }

        run_one_tick(&config, &mut world, seed);

        assert_eq!(world.get(center), Cell::Empty, "seed {seed}");
        assert_eq!(world.current().population().sharks, 4, "seed {seed}");
    }
}

#[test]
fn test_moves_wrap_around_edges() {
    let config = scenario_config(4, 4);

    // (fish, only free neighbor); the other three neighbors hold idle fish
    let cases = [
        (Pos::new(0, 0), Pos::new(3, 0)),
        (Pos::new(0, 0), Pos::new(0, 3)),
        (Pos::new(3, 3), Pos::new(0, 3)),
        (Pos::new(3, 3), Pos::new(3, 0)),
    ];

    for (fish, target) in cases {
        let blockers = [
            Pos::new((fish.x + 3) % 4, fish.y),
            Pos::new((fish.x + 1) % 4, fish.y),
            Pos::new(fish.x, (fish.y + 3) % 4),
            Pos::new(fish.x, (fish.y + 1) % 4),
        ];

        let mut world = WorldState::new(4, 4);
        world.set(fish, Cell::fish(3));
        for pos in blockers.into_iter().filter(|&pos| pos != target) {
            world.set(pos, Cell::fish(3));
        }

        run_one_tick(&config, &mut world, 5);

        assert_eq!(world.get(target), Cell::fish(2), "{fish:?} -> {target:?}");
        assert_eq!(world.current().population().fish, 4);
    }
}
