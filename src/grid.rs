//! Fixed-size square grid of cells.

use rand::Rng;

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::rules::Pattern;

/// Smallest grid with at least one interior cell.
pub const MIN_GRID_COUNT: usize = 3;

/// Probability that a cell starts alive under [`Seeding::Random`].
pub const LIVE_PROBABILITY: f64 = 0.5;

/// How a freshly created grid is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Seeding {
    /// Each cell independently alive with probability [`LIVE_PROBABILITY`].
    #[default]
    Random,
    /// Every cell dead.
    Empty,
}

/// A `size x size` matrix of cells stored row-major.
///
/// Dimensions are fixed at construction. Coordinates are zero-based
/// `(row, col)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid, drawing random cells from the thread-local RNG.
    pub fn new(size: usize, seeding: Seeding) -> Result<Self> {
        Self::with_rng(size, seeding, &mut rand::thread_rng())
    }

    /// Creates a grid, drawing random cells from `rng`.
    ///
    /// `rng` is not touched for [`Seeding::Empty`].
    pub fn with_rng<R: Rng>(size: usize, seeding: Seeding, rng: &mut R) -> Result<Self> {
        validate_size(size)?;
        Ok(Self::seeded(size, seeding, rng))
    }

    /// `size` must already be validated.
    pub(crate) fn seeded<R: Rng>(size: usize, seeding: Seeding, rng: &mut R) -> Self {
        let cells = match seeding {
            Seeding::Empty => vec![Cell::Dead; size * size],
            Seeding::Random => (0..size * size)
                .map(|_| Cell::from(rng.gen_bool(LIVE_PROBABILITY)))
                .collect(),
        };
        Grid { size, cells }
    }

    /// Builds a grid from an explicit matrix, `true` meaning alive.
    ///
    /// The matrix must be square with at least [`MIN_GRID_COUNT`] rows.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let size = rows.len();
        validate_size(size)?;
        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(if row == 0 {
                    Error::NonSquareMatrix {
                        rows: size,
                        cols: values.len(),
                    }
                } else {
                    Error::RaggedMatrix {
                        row,
                        expected: size,
                        found: values.len(),
                    }
                });
            }
            cells.extend(values.into_iter().map(Cell::from));
        }
        Ok(Grid { size, cells })
    }

    /// Number of cells per side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Current state of the cell at `(row, col)`.
    ///
    /// # Arguments
    ///
    /// * `row` - Zero-based row, below [`Grid::size`]
    /// * `col` - Zero-based column, below [`Grid::size`]
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if either coordinate is off the grid.
    pub fn get(&self, row: usize, col: usize) -> Result<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Overwrites one cell. Out-of-range coordinates are rejected like [`Grid::get`].
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<()> {
        let idx = self.index(row, col)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Flips the cell at `(row, col)`.
    ///
    /// Border cells may be toggled too, even though the rule never evaluates
    /// them. No neighbor counts are touched; they are recomputed on every step.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if either coordinate is off the grid.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<()> {
        let idx = self.index(row, col)?;
        self.cells[idx] = self.cells[idx].flipped();
        Ok(())
    }

    /// True when both coordinates lie strictly between 0 and `size - 1`.
    pub fn is_interior(&self, row: usize, col: usize) -> bool {
        (1..self.size - 1).contains(&row) && (1..self.size - 1).contains(&col)
    }

    /// Counts the live neighbors of an interior cell.
    ///
    /// This is a pure read of the current states; the cell itself is never
    /// counted.
    ///
    /// # Arguments
    ///
    /// * `row` - Row of the cell, in `1..size - 1`
    /// * `col` - Column of the cell, in `1..size - 1`
    ///
    /// # Returns
    ///
    /// The number of live neighbors (0-8)
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] off the grid, [`Error::NotInterior`] for a
    /// border cell, which has no defined count.
    pub fn count_live_neighbors(&self, row: usize, col: usize) -> Result<u8> {
        self.index(row, col)?;
        if !self.is_interior(row, col) {
            return Err(Error::NotInterior {
                row,
                col,
                size: self.size,
            });
        }
        Ok(self.live_neighbors(row, col))
    }

    /// Live neighbor counts of every cell, row-major, read from the current
    /// states only. Border entries are always zero.
    pub fn neighbor_counts(&self) -> Vec<u8> {
        let mut counts = vec![0; self.cells.len()];
        for row in 1..self.size - 1 {
            for col in 1..self.size - 1 {
                counts[row * self.size + col] = self.live_neighbors(row, col);
            }
        }
        counts
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Iterates over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.size)
    }

    /// Sets the live cells of `pattern` with its top-left corner at
    /// `(row, col)`.
    ///
    /// Nothing is written unless the whole pattern fits inside the grid.
    pub fn place(&mut self, pattern: Pattern, row: usize, col: usize) -> Result<()> {
        let (height, width) = pattern.extent();
        let out_of_bounds = |row, col| Error::OutOfBounds {
            row,
            col,
            size: self.size,
        };
        let (bottom, right) = match (row.checked_add(height - 1), col.checked_add(width - 1)) {
            (Some(bottom), Some(right)) => (bottom, right),
            _ => return Err(out_of_bounds(row, col)),
        };
        if bottom >= self.size || right >= self.size {
            return Err(out_of_bounds(bottom, right));
        }
        for &(dr, dc) in pattern.cells() {
            self.cells[(row + dr) * self.size + col + dc] = Cell::Alive;
        }
        Ok(())
    }

    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Exchanges the cell buffer with `next`, which must hold `size * size`
    /// cells.
    pub(crate) fn swap_cells(&mut self, next: &mut Vec<Cell>) {
        debug_assert_eq!(next.len(), self.cells.len());
        std::mem::swap(&mut self.cells, next);
    }

    fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut count = 0;
        for r in row - 1..=row + 1 {
            for c in col - 1..=col + 1 {
                if r == row && c == col {
                    continue;
                }
                count += self.cells[r * self.size + c].weight();
            }
        }
        count
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row < self.size && col < self.size {
            Ok(row * self.size + col)
        } else {
            Err(Error::OutOfBounds {
                row,
                col,
                size: self.size,
            })
        }
    }
}

pub(crate) fn validate_size(size: usize) -> Result<()> {
    if size < MIN_GRID_COUNT {
        log::warn!("rejecting grid size {size}");
        return Err(Error::InvalidGridSize { size });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn full(size: usize) -> Grid {
        Grid::from_rows(vec![vec![true; size]; size]).unwrap()
    }

    #[test]
    fn rejects_small_sizes() {
        for size in 0..MIN_GRID_COUNT {
            assert_eq!(
                Grid::new(size, Seeding::Empty),
                Err(Error::InvalidGridSize { size })
            );
        }
        assert!(Grid::new(MIN_GRID_COUNT, Seeding::Random).is_ok());
    }

    #[test]
    fn empty_seeding_is_all_dead() {
        let grid = Grid::new(10, Seeding::Empty).unwrap();
        assert_eq!(grid.size(), 10);
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.rows().count(), 10);
    }

    #[test]
    fn random_seeding_is_reproducible_with_seeded_rng() {
        let a = Grid::with_rng(20, Seeding::Random, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = Grid::with_rng(20, Seeding::Random, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
        // 400 fair coin flips; anything outside this band means a broken seeding
        let population = a.population();
        assert!((120..=280).contains(&population), "population {population}");
    }

    #[test]
    fn from_rows_rejects_bad_shapes() {
        assert_eq!(
            Grid::from_rows(vec![vec![false; 4]; 3]),
            Err(Error::NonSquareMatrix { rows: 3, cols: 4 })
        );
        let mut rows = vec![vec![false; 3]; 3];
        rows[2].pop();
        assert_eq!(
            Grid::from_rows(rows),
            Err(Error::RaggedMatrix {
                row: 2,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            Grid::from_rows(vec![vec![true; 2]; 2]),
            Err(Error::InvalidGridSize { size: 2 })
        );
    }

    #[test]
    fn get_out_of_range() {
        let grid = Grid::new(5, Seeding::Empty).unwrap();
        assert_eq!(grid.get(4, 4), Ok(Cell::Dead));
        assert_eq!(
            grid.get(5, 0),
            Err(Error::OutOfBounds {
                row: 5,
                col: 0,
                size: 5
            })
        );
        assert!(grid.get(0, 5).unwrap_err().is_index());
    }

    #[test]
    fn toggle_flips_including_border() {
        let mut grid = Grid::new(5, Seeding::Empty).unwrap();
        grid.toggle(0, 0).unwrap();
        grid.toggle(2, 2).unwrap();
        assert_eq!(grid.get(0, 0), Ok(Cell::Alive));
        assert_eq!(grid.get(2, 2), Ok(Cell::Alive));
        grid.toggle(2, 2).unwrap();
        assert_eq!(grid.get(2, 2), Ok(Cell::Dead));
        assert!(grid.toggle(7, 1).is_err());
    }

    #[test]
    fn neighbor_count_excludes_self() {
        let grid = full(3);
        assert_eq!(grid.count_live_neighbors(1, 1), Ok(8));

        let mut grid = Grid::new(3, Seeding::Empty).unwrap();
        grid.set(1, 1, Cell::Alive).unwrap();
        assert_eq!(grid.count_live_neighbors(1, 1), Ok(0));
    }

    #[test]
    fn neighbor_count_only_for_interior() {
        let grid = full(5);
        assert_eq!(
            grid.count_live_neighbors(0, 2),
            Err(Error::NotInterior {
                row: 0,
                col: 2,
                size: 5
            })
        );
        assert!(grid.count_live_neighbors(2, 4).is_err());
        assert!(grid.count_live_neighbors(9, 9).unwrap_err().is_index());
    }

    #[test]
    fn neighbor_counts_zero_on_border() {
        let grid = full(4);
        let counts = grid.neighbor_counts();
        assert_eq!(
            counts,
            vec![
                0, 0, 0, 0, //
                0, 8, 8, 0, //
                0, 8, 8, 0, //
                0, 0, 0, 0,
            ]
        );
    }

    #[test]
    fn place_pattern() {
        let mut grid = Grid::new(6, Seeding::Empty).unwrap();
        grid.place(Pattern::Block, 2, 3).unwrap();
        assert_eq!(grid.population(), 4);
        assert_eq!(grid.get(3, 4), Ok(Cell::Alive));
    }

    #[test]
    fn place_pattern_near_usize_max_is_rejected() {
        let mut grid = Grid::new(6, Seeding::Empty).unwrap();
        assert_eq!(
            grid.place(Pattern::Block, usize::MAX, 0),
            Err(Error::OutOfBounds {
                row: usize::MAX,
                col: 0,
                size: 6
            })
        );
        assert_eq!(
            grid.place(Pattern::Glider, 1, usize::MAX - 1),
            Err(Error::OutOfBounds {
                row: 1,
                col: usize::MAX - 1,
                size: 6
            })
        );
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn place_pattern_that_does_not_fit_writes_nothing() {
        let mut grid = Grid::new(6, Seeding::Empty).unwrap();
        let err = grid.place(Pattern::Glider, 4, 0).unwrap_err();
        assert!(err.is_index());
        assert_eq!(grid.population(), 0);
    }
}
