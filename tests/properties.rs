use life_engine::{Cell, Engine, Grid, Pattern, Seeding};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_grid(size: usize, seed: u64) -> Grid {
    Grid::with_rng(size, Seeding::Random, &mut StdRng::seed_from_u64(seed)).unwrap()
}

fn live_cells(engine: &Engine) -> Vec<(usize, usize)> {
    let size = engine.grid_size();
    (0..size)
        .flat_map(|r| (0..size).map(move |c| (r, c)))
        .filter(|&(r, c)| engine.cell_state(r, c) == Ok(Cell::Alive))
        .collect()
}

fn border(size: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..size)
        .flat_map(move |r| (0..size).map(move |c| (r, c)))
        .filter(move |&(r, c)| r == 0 || c == 0 || r == size - 1 || c == size - 1)
}

#[test]
fn step_is_deterministic() {
    for seed in 0..8 {
        let grid = random_grid(24, seed);
        let mut a = Engine::from_grid(grid.clone());
        let mut b = Engine::from_grid(grid);
        for _ in 0..5 {
            a.step();
            b.step();
            assert_eq!(a.grid(), b.grid());
        }
    }
}

#[test]
fn border_is_invariant_under_step() {
    for seed in 0..8 {
        let mut engine = Engine::from_grid(random_grid(16, seed));
        for _ in 0..10 {
            let before: Vec<_> = border(16)
                .map(|(r, c)| engine.cell_state(r, c).unwrap())
                .collect();
            engine.step();
            let after: Vec<_> = border(16)
                .map(|(r, c)| engine.cell_state(r, c).unwrap())
                .collect();
            assert_eq!(before, after);
        }
    }
}

#[test]
fn neighbor_count_is_bounded_and_excludes_self() {
    let grid = random_grid(20, 11);
    for r in 1..19 {
        for c in 1..19 {
            let n = grid.count_live_neighbors(r, c).unwrap();
            assert!(n <= 8);

            let mut flipped = grid.clone();
            flipped.toggle(r, c).unwrap();
            assert_eq!(flipped.count_live_neighbors(r, c), Ok(n));
        }
    }
}

#[test]
fn block_is_a_still_life() {
    let mut engine = Engine::new(12, Seeding::Empty).unwrap();
    engine.place_pattern(Pattern::Block, 5, 5).unwrap();
    let expected = vec![(5, 5), (5, 6), (6, 5), (6, 6)];
    for (r, c) in &expected {
        assert_eq!(engine.grid().count_live_neighbors(*r, *c), Ok(3));
    }
    for _ in 0..20 {
        engine.step();
        assert_eq!(live_cells(&engine), expected);
    }
    assert_eq!(engine.generation_count(), 20);
}

#[test]
fn blinker_has_period_two() {
    let mut engine = Engine::new(9, Seeding::Empty).unwrap();
    engine.place_pattern(Pattern::Blinker, 5, 4).unwrap();
    let horizontal = vec![(5, 4), (5, 5), (5, 6)];
    let vertical = vec![(4, 5), (5, 5), (6, 5)];
    assert_eq!(live_cells(&engine), horizontal);

    engine.step();
    assert_eq!(live_cells(&engine), vertical);
    engine.step();
    assert_eq!(live_cells(&engine), horizontal);
}

#[test]
fn glider_translates_diagonally() {
    let mut engine = Engine::new(12, Seeding::Empty).unwrap();
    engine.place_pattern(Pattern::Glider, 2, 2).unwrap();
    let start = live_cells(&engine);
    for _ in 0..4 {
        engine.step();
    }
    let moved: Vec<_> = start.iter().map(|&(r, c)| (r + 1, c + 1)).collect();
    assert_eq!(live_cells(&engine), moved);
}

#[test]
fn glider_freezes_against_the_border() {
    let mut engine = Engine::new(8, Seeding::Empty).unwrap();
    engine.place_pattern(Pattern::Glider, 3, 3).unwrap();
    for _ in 0..40 {
        engine.step();
    }
    // The glider runs into the frozen border and settles into a block.
    let settled = engine.grid().clone();
    engine.step();
    engine.step();
    assert_eq!(engine.grid(), &settled);
    assert_eq!(engine.stats().population, 4);
}

#[test]
fn double_toggle_restores_state() {
    let mut engine = Engine::with_seed(10, Seeding::Random, 5).unwrap();
    engine.step();
    let before = engine.grid().clone();
    let generation = engine.generation_count();
    let mut rng = StdRng::seed_from_u64(6);
    for _ in 0..20 {
        let (r, c) = (rng.gen_range(0..10), rng.gen_range(0..10));
        engine.toggle_cell(r, c).unwrap();
        assert_ne!(engine.grid(), &before);
        engine.toggle_cell(r, c).unwrap();
        assert_eq!(engine.grid(), &before);
    }
    assert_eq!(engine.generation_count(), generation);
}

#[test]
fn clear_resets_everything() {
    let mut engine = Engine::with_seed(10, Seeding::Random, 8).unwrap();
    engine.start();
    for _ in 0..3 {
        engine.step();
    }
    engine.clear();
    assert_eq!(engine.generation_count(), 0);
    assert!(!engine.is_running());
    assert!(live_cells(&engine).is_empty());
}

#[test]
fn generation_counts_every_step_regardless_of_run_state() {
    let mut engine = Engine::new(6, Seeding::Random).unwrap();
    let before = engine.generation_count();
    for _ in 0..3 {
        engine.step();
    }
    engine.start();
    for _ in 0..4 {
        engine.step();
    }
    engine.pause();
    engine.step();
    assert_eq!(engine.generation_count(), before + 8);
}

#[test]
fn empty_grid_keeps_stepping() {
    let mut engine = Engine::new(5, Seeding::Empty).unwrap();
    for _ in 0..100 {
        engine.step();
    }
    assert_eq!(engine.generation_count(), 100);
    assert_eq!(engine.stats().population, 0);
}
