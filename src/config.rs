//! Engine construction parameters.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engine::Engine;
use crate::error::Result;
use crate::grid::Seeding;

/// Cells per side when nothing else is asked for.
pub const DEFAULT_GRID_COUNT: usize = 50;

/// Milliseconds between generations while running.
pub const DEFAULT_STEP_INTERVAL_MS: u64 = 500;

/// Everything needed to build an [`Engine`], validated as a whole by
/// [`EngineConfig::build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub grid_count: usize,
    pub seeding: Seeding,
    pub step_interval_ms: u64,
    /// Fixed RNG seed for reproducible seeding; OS entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            grid_count: DEFAULT_GRID_COUNT,
            seeding: Seeding::Random,
            step_interval_ms: DEFAULT_STEP_INTERVAL_MS,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Validates the configuration and constructs the engine.
    pub fn build(&self) -> Result<Engine> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut engine = Engine::with_rng(self.grid_count, self.seeding, rng)?;
        engine.set_step_interval(self.step_interval_ms)?;
        Ok(engine)
    }
}
