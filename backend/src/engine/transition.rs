//! Transition engine
//!
//! Computes the next generation of a board under Conway's rule (B3/S23) on a
//! bounded grid. Neighborhoods are clipped at the edges: positions outside
//! the grid contribute nothing, there is no wraparound.
//!
//! # Critical Invariants
//!
//! 1. The next matrix is computed entirely from the current one and only
//!    then swapped in, so no cell ever sees a partially updated generation
//! 2. A stable board is a terminal state: `advance` is a no-op on it
//! 3. Output depends only on the input cells (deterministic)

use crate::models::board::Board;
use crate::models::cells::CellGrid;

/// Fewest live neighbors a live cell needs to survive
pub const MIN_NEIGHBORS_FOR_SURVIVAL: u8 = 2;

/// Most live neighbors a live cell tolerates
pub const MAX_NEIGHBORS_FOR_SURVIVAL: u8 = 3;

/// Exact live-neighbor count that brings a dead cell to life
pub const NEIGHBORS_FOR_BIRTH: u8 = 3;

/// What a single `advance` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionOutcome {
    /// Board generation after the call
    pub generation: u64,

    /// Number of cells whose value flipped
    pub cells_changed: usize,

    /// Board stability after the call
    pub is_stable: bool,

    /// True when the board was already stable and nothing was computed
    pub skipped: bool,
}

/// Advance a board by one generation, in place
///
/// A board that is already stable is returned untouched (no recomputation,
/// no generation increment). Otherwise the generation goes up by one and the
/// board becomes stable if no cell changed.
///
/// # Example
/// ```
/// use game_of_life_core_rs::{advance, Board, CellGrid};
/// use uuid::Uuid;
///
/// let block = CellGrid::new(vec![
///     vec![false, false, false, false],
///     vec![false, true, true, false],
///     vec![false, true, true, false],
///     vec![false, false, false, false],
/// ]).unwrap();
/// let mut board = Board::new(Uuid::new_v4(), block.clone());
///
/// let outcome = advance(&mut board);
/// assert!(outcome.is_stable);
/// assert_eq!(board.generation(), 2);
/// assert_eq!(board.state(), &block);
/// ```
pub fn advance(board: &mut Board) -> TransitionOutcome {
    if board.is_stable() {
        return TransitionOutcome {
            generation: board.generation(),
            cells_changed: 0,
            is_stable: true,
            skipped: true,
        };
    }

    let (next, cells_changed) = next_generation(board.state());
    let is_stable = cells_changed == 0;
    board.set_next_state(next, is_stable);

    tracing::debug!(
        board_id = %board.id(),
        generation = board.generation(),
        cells_changed,
        is_stable,
        "advanced board"
    );

    TransitionOutcome {
        generation: board.generation(),
        cells_changed,
        is_stable,
        skipped: false,
    }
}

/// Compute the next matrix without touching any board
///
/// Returns the new grid and how many cells differ from `current`.
pub fn next_generation(current: &CellGrid) -> (CellGrid, usize) {
    let (rows, cols) = (current.rows(), current.cols());
    let mut next = Vec::with_capacity(rows * cols);
    let mut cells_changed = 0;

    for row in 0..rows {
        for col in 0..cols {
            let alive = current.get(row, col);
            let live_neighbors = count_live_neighbors(current, row, col);
            let next_alive = next_cell_state(alive, live_neighbors);

            if next_alive != alive {
                cells_changed += 1;
            }
            next.push(next_alive);
        }
    }

    (CellGrid::from_parts(rows, cols, next), cells_changed)
}

/// Live cells among the Moore neighbors of `(row, col)`, clipped at the edges
pub fn count_live_neighbors(grid: &CellGrid, row: usize, col: usize) -> u8 {
    let row_start = row.saturating_sub(1);
    let row_end = (row + 1).min(grid.rows() - 1);
    let col_start = col.saturating_sub(1);
    let col_end = (col + 1).min(grid.cols() - 1);

    let mut count = 0;
    for r in row_start..=row_end {
        for c in col_start..=col_end {
            if (r, c) != (row, col) && grid.get(r, c) {
                count += 1;
            }
        }
    }
    count
}

/// B3/S23: survival on 2 or 3 neighbors, birth on exactly 3
pub fn next_cell_state(alive: bool, live_neighbors: u8) -> bool {
    if alive {
        (MIN_NEIGHBORS_FOR_SURVIVAL..=MAX_NEIGHBORS_FOR_SURVIVAL).contains(&live_neighbors)
    } else {
        live_neighbors == NEIGHBORS_FOR_BIRTH
    }
}
