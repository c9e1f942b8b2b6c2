//! Cell matrix
//!
//! A rectangular matrix of live/dead cells. Every `CellGrid` in the system
//! went through validation, so downstream code (the transition engine in
//! particular) never has to handle empty or ragged input.
//!
//! # Critical Invariants
//!
//! 1. `rows >= 1` and `cols >= 1`
//! 2. `cells.len() == rows * cols` (row-major)
//! 3. Dimensions never change once constructed

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a caller-supplied matrix is rejected
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Initial state cannot be empty")]
    Empty,

    #[error("Initial state must have at least one column")]
    NoColumns,

    #[error("Row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Rectangular boolean matrix, `true` meaning a live cell
///
/// Serializes as a JSON array of arrays. Deserialization runs the same
/// validation as [`CellGrid::new`].
///
/// # Example
/// ```
/// use game_of_life_core_rs::CellGrid;
///
/// let grid = CellGrid::new(vec![
///     vec![false, true, false],
///     vec![false, true, false],
/// ]).unwrap();
///
/// assert_eq!(grid.rows(), 2);
/// assert_eq!(grid.cols(), 3);
/// assert!(grid.get(1, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<bool>>", into = "Vec<Vec<bool>>")]
pub struct CellGrid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl CellGrid {
    /// Validate and build a grid from rows of cells
    ///
    /// # Errors
    /// - [`GridError::Empty`] when there are no rows
    /// - [`GridError::NoColumns`] when the first row is empty
    /// - [`GridError::Ragged`] when any row differs in length from the first
    pub fn new(rows: Vec<Vec<bool>>) -> Result<Self, GridError> {
        let expected = match rows.first() {
            None => return Err(GridError::Empty),
            Some(first) if first.is_empty() => return Err(GridError::NoColumns),
            Some(first) => first.len(),
        };

        if let Some((row, found)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != expected)
            .map(|(i, r)| (i, r.len()))
        {
            return Err(GridError::Ragged {
                row,
                expected,
                found,
            });
        }

        let num_rows = rows.len();
        Ok(Self {
            rows: num_rows,
            cols: expected,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// All-dead grid of the given size
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn dead(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "grid dimensions must be positive");
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell value at `(row, col)`
    ///
    /// # Panics
    /// Panics if the position is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[self.index(row, col)]
    }

    /// Number of live cells
    pub fn live_cells(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Copy out as a vector of rows
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.cells.chunks(self.cols).map(<[bool]>::to_vec).collect()
    }

    /// Build from an already materialized row-major buffer
    pub(crate) fn from_parts(rows: usize, cols: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({}, {}) outside {}x{} grid",
            row,
            col,
            self.rows,
            self.cols
        );
        row * self.cols + col
    }
}

impl TryFrom<Vec<Vec<bool>>> for CellGrid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<bool>>) -> Result<Self, Self::Error> {
        CellGrid::new(rows)
    }
}

impl From<CellGrid> for Vec<Vec<bool>> {
    fn from(grid: CellGrid) -> Self {
        grid.to_rows()
    }
}
