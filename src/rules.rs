//! Conway's transition rule and a small catalogue of named patterns.
//!
//! Game of Life standard rules:
//! 1. Any live cell with fewer than two live neighbors dies (underpopulation)
//! 2. Any live cell with two or three live neighbors lives (survival)
//! 3. Any live cell with more than three live neighbors dies (overcrowding)
//! 4. Any dead cell with exactly three live neighbors becomes alive (reproduction)

use crate::cell::Cell;

/// What the rule did to one cell during a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Dead cell with exactly three live neighbors.
    Birth,
    /// Live cell with fewer than two or more than three live neighbors.
    Death,
    /// Live cell with two or three live neighbors.
    Survival,
    /// Dead cell that stays dead.
    Unchanged,
}

impl Transition {
    /// Classifies a cell given its state and live neighbor count.
    pub fn classify(cell: Cell, live_neighbors: u8) -> Self {
        match (cell, live_neighbors) {
            (Cell::Alive, n) if n < 2 => Transition::Death,
            (Cell::Alive, 2) | (Cell::Alive, 3) => Transition::Survival,
            (Cell::Alive, _) => Transition::Death,
            (Cell::Dead, 3) => Transition::Birth,
            (Cell::Dead, _) => Transition::Unchanged,
        }
    }

    /// The state a cell has after this transition.
    pub fn result(self) -> Cell {
        match self {
            Transition::Birth | Transition::Survival => Cell::Alive,
            Transition::Death | Transition::Unchanged => Cell::Dead,
        }
    }
}

/// Next state of a cell with `live_neighbors` live neighbors.
pub fn next_state(cell: Cell, live_neighbors: u8) -> Cell {
    Transition::classify(cell, live_neighbors).result()
}

/// Predefined patterns for seeding a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// 2x2 still life
    Block,
    /// Period 2 oscillator, horizontal phase
    Blinker,
    /// Period 2 oscillator
    Toad,
    /// Diagonal spaceship heading down-right
    Glider,
    /// Horizontal spaceship heading left
    LightweightSpaceship,
}

impl Pattern {
    pub const ALL: [Pattern; 5] = [
        Pattern::Block,
        Pattern::Blinker,
        Pattern::Toad,
        Pattern::Glider,
        Pattern::LightweightSpaceship,
    ];

    /// Live cells as `(row, col)` offsets from the pattern's top-left corner.
    pub fn cells(self) -> &'static [(usize, usize)] {
        match self {
            Pattern::Block => &[(0, 0), (0, 1), (1, 0), (1, 1)],
            Pattern::Blinker => &[(0, 0), (0, 1), (0, 2)],
            Pattern::Toad => &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
            Pattern::Glider => &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
            Pattern::LightweightSpaceship => &[
                (0, 1),
                (0, 4),
                (1, 0),
                (2, 0),
                (2, 4),
                (3, 0),
                (3, 1),
                (3, 2),
                (3, 3),
            ],
        }
    }

    /// Bounding box as `(rows, cols)`.
    pub fn extent(self) -> (usize, usize) {
        self.cells()
            .iter()
            .fold((0, 0), |(h, w), &(r, c)| (h.max(r + 1), w.max(c + 1)))
    }

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Block => "block",
            Pattern::Blinker => "blinker",
            Pattern::Toad => "toad",
            Pattern::Glider => "glider",
            Pattern::LightweightSpaceship => "lwss",
        }
    }
}
