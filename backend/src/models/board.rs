//! Board model
//!
//! A board is a [`CellGrid`] under simulation plus the metadata the service
//! exposes to callers:
//! - Identifier (UUID, assigned by the store that creates the board)
//! - Generation counter (starts at 1)
//! - Stability flag (set once a transition changes nothing)
//!
//! Only the transition engine moves a board forward; everything else reads.

use crate::models::cells::CellGrid;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generation assigned to a freshly created board
pub const INITIAL_GENERATION: u64 = 1;

/// A Game of Life board
///
/// # Example
/// ```
/// use game_of_life_core_rs::{Board, CellGrid};
/// use uuid::Uuid;
///
/// let cells = CellGrid::new(vec![vec![true, true], vec![true, true]]).unwrap();
/// let board = Board::new(Uuid::new_v4(), cells);
///
/// assert_eq!(board.generation(), 1);
/// assert!(!board.is_stable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Store-assigned identifier, immutable for the board's lifetime
    id: Uuid,

    /// Current generation's cells
    state: CellGrid,

    /// Transitions applied since creation, plus one
    generation: u64,

    /// Set by the first transition that changed no cell; never cleared
    is_stable: bool,
}

impl Board {
    /// Create a board at generation 1, not yet stable
    pub fn new(id: Uuid, state: CellGrid) -> Self {
        Self {
            id,
            state,
            generation: INITIAL_GENERATION,
            is_stable: false,
        }
    }

    /// Rebuild a board from persisted fields
    ///
    /// Stores are expected to validate the record first (see
    /// [`crate::store::snapshot::validate_snapshot`]).
    pub fn restore(id: Uuid, state: CellGrid, generation: u64, is_stable: bool) -> Self {
        Self {
            id,
            state,
            generation,
            is_stable,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &CellGrid {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_stable(&self) -> bool {
        self.is_stable
    }

    /// Replace the cells with a fully computed next generation
    ///
    /// The engine is the only caller. Dimensions must match.
    pub(crate) fn set_next_state(&mut self, next: CellGrid, is_stable: bool) {
        debug_assert_eq!(
            (next.rows(), next.cols()),
            (self.state.rows(), self.state.cols())
        );
        self.state = next;
        self.generation += 1;
        self.is_stable = is_stable;
    }
}
