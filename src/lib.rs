//! # Life Engine
//!
//! The simulation core of Conway's Game of Life on a fixed-size square grid.
//!
//! The crate is split into two strictly layered pieces:
//!
//! * [`Grid`] owns the cell states and answers neighbor queries.
//! * [`Engine`] owns exactly one grid plus the generation counter and run
//!   state, and advances the simulation one generation at a time.
//!
//! The engine has no timer. A driver (such as the `life` terminal binary)
//! calls [`Engine::step`] on its own cadence while [`Engine::is_running`]
//! is true, reading the desired cadence from [`Engine::step_interval`].
//!
//! ## Boundary policy
//!
//! Only interior cells are evaluated against the rule. The outer ring of the
//! grid is never advanced by [`Engine::step`] and keeps whatever state it was
//! seeded or toggled to. This is a known limitation: the grid does not wrap
//! around (not toroidal) and does not clamp edges.
//!
//! ```
//! use life_engine::{Cell, Engine, Pattern, Seeding};
//!
//! let mut engine = Engine::new(9, Seeding::Empty)?;
//! engine.place_pattern(Pattern::Blinker, 5, 4)?;
//! engine.step();
//! assert_eq!(engine.cell_state(4, 5)?, Cell::Alive);
//! assert_eq!(engine.generation_count(), 1);
//! # Ok::<(), life_engine::Error>(())
//! ```

pub mod cell;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod rules;

pub use cell::Cell;
pub use config::{EngineConfig, DEFAULT_GRID_COUNT, DEFAULT_STEP_INTERVAL_MS};
pub use engine::{Engine, RunState, Stats};
pub use error::{Error, Result};
pub use grid::{Grid, Seeding, LIVE_PROBABILITY, MIN_GRID_COUNT};
pub use rules::{next_state, Pattern, Transition};
