//! All kinds of errors in this crate.

use thiserror::Error;

/// Errors raised by the simulation core.
///
/// Every failure is caller misuse: the core does no I/O and has nothing to
/// retry. Variants fall into two families, see [`Error::is_configuration`]
/// and [`Error::is_index`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Grid size too small to contain an interior cell.
    #[error("grid size {size} is invalid, at least 3 cells per side are required")]
    InvalidGridSize { size: usize },
    /// Step interval must be a positive number of milliseconds.
    #[error("step interval of {ms} ms is invalid, it must be positive")]
    InvalidStepInterval { ms: u64 },
    /// An explicit cell matrix with a row of the wrong length.
    #[error("row {row} of the initial matrix has {found} cells, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// An explicit cell matrix that is not square.
    #[error("initial matrix is {rows}x{cols}, the grid must be square")]
    NonSquareMatrix { rows: usize, cols: usize },
    /// Coordinate outside the grid.
    #[error("cell ({row}, {col}) is outside a grid of size {size}")]
    OutOfBounds { row: usize, col: usize, size: usize },
    /// Neighbor query on a border cell; only interior cells have a defined count.
    #[error("cell ({row}, {col}) is on the border of a grid of size {size}")]
    NotInterior { row: usize, col: usize, size: usize },
}

impl Error {
    /// Bad value supplied at construction or configuration time.
    pub fn is_configuration(&self) -> bool {
        !self.is_index()
    }

    /// Out-of-range coordinate access.
    pub fn is_index(&self) -> bool {
        matches!(
            self,
            Error::OutOfBounds { .. } | Error::NotInterior { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
