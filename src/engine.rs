//! The simulation engine: one grid, a generation counter and a run state.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cell::Cell;
use crate::config::DEFAULT_STEP_INTERVAL_MS;
use crate::error::{Error, Result};
use crate::grid::{validate_size, Grid, Seeding};
use crate::rules::{Pattern, Transition};

/// Stores statistics about the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    /// Completed generations since construction or the last clear/reset
    pub generation: u64,
    /// Cells born during the most recent step
    pub births: u64,
    /// Cells that died during the most recent step
    pub deaths: u64,
    /// Cells born since the counter was last reset
    pub total_births: u64,
    /// Cells that died since the counter was last reset
    pub total_deaths: u64,
    /// Current number of living cells
    pub population: u64,
}

impl Stats {
    fn fresh(grid: &Grid) -> Self {
        Stats {
            population: grid.population() as u64,
            ..Stats::default()
        }
    }
}

/// Whether the driver should be stepping the engine automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Paused,
    Running,
}

/// Owns a [`Grid`] and advances it one generation at a time.
///
/// The engine is synchronous and single-writer. It never sleeps or spawns
/// work; the driver owns the timer and calls [`Engine::step`] while
/// [`Engine::is_running`] reports true.
#[derive(Debug, Clone)]
pub struct Engine {
    grid: Grid,
    /// Next-generation buffer, swapped with the grid's cells on every step.
    next: Vec<Cell>,
    run_state: RunState,
    step_interval_ms: u64,
    stats: Stats,
    rng: StdRng,
}

impl Engine {
    /// Creates an engine with a grid seeded from OS entropy.
    pub fn new(grid_count: usize, seeding: Seeding) -> Result<Self> {
        Self::with_rng(grid_count, seeding, StdRng::from_entropy())
    }

    /// Creates an engine whose seeding, including later resets, is
    /// reproducible from `seed`.
    pub fn with_seed(grid_count: usize, seeding: Seeding, seed: u64) -> Result<Self> {
        Self::with_rng(grid_count, seeding, StdRng::seed_from_u64(seed))
    }

    /// Creates an engine around an explicit initial grid.
    pub fn from_grid(grid: Grid) -> Self {
        Self::assemble(grid, StdRng::from_entropy())
    }

    pub(crate) fn with_rng(grid_count: usize, seeding: Seeding, mut rng: StdRng) -> Result<Self> {
        validate_size(grid_count)?;
        let grid = Grid::seeded(grid_count, seeding, &mut rng);
        Ok(Self::assemble(grid, rng))
    }

    fn assemble(grid: Grid, rng: StdRng) -> Self {
        log::info!(
            "engine created: {0}x{0} grid, {1} live cells",
            grid.size(),
            grid.population()
        );
        Engine {
            next: grid.cells().to_vec(),
            stats: Stats::fresh(&grid),
            grid,
            run_state: RunState::Paused,
            step_interval_ms: DEFAULT_STEP_INTERVAL_MS,
            rng,
        }
    }

    /// Advances the grid by exactly one generation according to Conway's rules:
    ///
    /// * Any live cell with fewer than two live neighbors dies (underpopulation)
    /// * Any live cell with two or three live neighbors survives
    /// * Any live cell with more than three live neighbors dies (overcrowding)
    /// * Any dead cell with exactly three live neighbors becomes alive (reproduction)
    ///
    /// Neighbor counts are taken from the current generation before anything
    /// is written. New states go into a separate buffer that replaces the
    /// grid's cells once every interior cell is computed. Border cells keep
    /// their state. The generation counter increments regardless of the run
    /// state.
    pub fn step(&mut self) {
        let size = self.grid.size();
        let counts = self.grid.neighbor_counts();
        let current = self.grid.cells();

        // border cells carry over untouched
        self.next.clear();
        self.next.extend_from_slice(current);

        let mut births = 0;
        let mut deaths = 0;
        for row in 1..size - 1 {
            for col in 1..size - 1 {
                let idx = row * size + col;
                let transition = Transition::classify(current[idx], counts[idx]);
                match transition {
                    Transition::Birth => births += 1,
                    Transition::Death => deaths += 1,
                    Transition::Survival | Transition::Unchanged => {}
                }
                self.next[idx] = transition.result();
            }
        }

        self.grid.swap_cells(&mut self.next);

        let stats = &mut self.stats;
        stats.generation += 1;
        stats.births = births;
        stats.deaths = deaths;
        stats.total_births += births;
        stats.total_deaths += deaths;
        stats.population = stats.population + births - deaths;
        log::debug!(
            "generation {}: +{} -{} = {} alive",
            stats.generation,
            births,
            deaths,
            stats.population
        );
    }

    /// Flips one cell. Allowed in any run state, including on the border.
    ///
    /// # Arguments
    ///
    /// * `row` - Zero-based row of the cell
    /// * `col` - Zero-based column of the cell
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if the cell is off the grid. The generation
    /// counter is never affected.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<()> {
        self.grid.toggle(row, col)?;
        self.stats.population = self.grid.population() as u64;
        Ok(())
    }

    /// Sets the live cells of `pattern` with its top-left corner at
    /// `(row, col)`.
    pub fn place_pattern(&mut self, pattern: Pattern, row: usize, col: usize) -> Result<()> {
        self.grid.place(pattern, row, col)?;
        self.stats.population = self.grid.population() as u64;
        Ok(())
    }

    /// Marks the engine as running. No-op if it already is.
    pub fn start(&mut self) {
        if self.run_state == RunState::Paused {
            log::info!("running at generation {}", self.stats.generation);
            self.run_state = RunState::Running;
        }
    }

    /// Marks the engine as paused. No-op if it already is.
    pub fn pause(&mut self) {
        if self.run_state == RunState::Running {
            log::info!("paused at generation {}", self.stats.generation);
            self.run_state = RunState::Paused;
        }
    }

    /// Toggles the simulation between running and paused states.
    pub fn toggle_running(&mut self) {
        match self.run_state {
            RunState::Paused => self.start(),
            RunState::Running => self.pause(),
        }
    }

    /// Empties the grid, zeroes the counters and pauses.
    pub fn clear(&mut self) {
        self.replace_grid(Seeding::Empty);
    }

    /// Reseeds the grid at random, zeroes the counters and pauses.
    pub fn reset(&mut self) {
        self.replace_grid(Seeding::Random);
    }

    fn replace_grid(&mut self, seeding: Seeding) {
        self.grid = Grid::seeded(self.grid.size(), seeding, &mut self.rng);
        self.stats = Stats::fresh(&self.grid);
        self.run_state = RunState::Paused;
        log::info!(
            "grid replaced ({:?}), {} live cells",
            seeding,
            self.stats.population
        );
    }

    /// Records the cadence the driver should step at. The engine itself
    /// has no timer.
    pub fn set_step_interval(&mut self, ms: u64) -> Result<()> {
        if ms == 0 {
            log::warn!("rejecting step interval of {ms} ms");
            return Err(Error::InvalidStepInterval { ms });
        }
        if ms != self.step_interval_ms {
            log::info!("step interval {} ms -> {} ms", self.step_interval_ms, ms);
            self.step_interval_ms = ms;
        }
        Ok(())
    }

    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }

    pub fn step_interval_ms(&self) -> u64 {
        self.step_interval_ms
    }

    /// Generations completed since construction or the last clear/reset.
    pub fn generation_count(&self) -> u64 {
        self.stats.generation
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Current state of one cell, see [`Grid::get`].
    pub fn cell_state(&self, row: usize, col: usize) -> Result<Cell> {
        self.grid.get(row, col)
    }

    pub fn grid_size(&self) -> usize {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }
}
