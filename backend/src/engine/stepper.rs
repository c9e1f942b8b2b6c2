//! Bounded stepper
//!
//! Drives [`advance`] repeatedly with an early exit on stability. Two modes:
//! - Advance by a positive count ([`advance_by`])
//! - Run to a fixed point within an attempt budget ([`run_to_stable`])
//!
//! Both are plain counted loops. Neither ever applies more transitions than
//! its count/budget allows.

use crate::engine::transition::advance;
use crate::models::board::Board;
use thiserror::Error;

/// Errors raised by the stepper
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StepperError {
    #[error("Number of states must be positive, got {0}")]
    NonPositiveStepCount(i64),

    #[error("Board did not reach a stable state after {max_attempts} attempts")]
    NotStabilized { max_attempts: usize },
}

/// A validated, strictly positive number of generations to advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepCount(u64);

impl StepCount {
    /// Validate a caller-supplied step count
    ///
    /// # Errors
    /// [`StepperError::NonPositiveStepCount`] when `count <= 0`.
    pub fn new(count: i64) -> Result<Self, StepperError> {
        if count <= 0 {
            return Err(StepperError::NonPositiveStepCount(count));
        }
        Ok(Self(count as u64))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Where a board sits in its lifecycle
///
/// `Evolving --advance(change)--> Evolving`,
/// `Evolving --advance(no change)--> Stable`,
/// `Stable --advance--> Stable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardPhase {
    Evolving,
    Stable,
}

impl BoardPhase {
    pub fn of(board: &Board) -> Self {
        if board.is_stable() {
            BoardPhase::Stable
        } else {
            BoardPhase::Evolving
        }
    }
}

/// Summary of a stepper run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Transitions actually applied (skipped no-ops are not counted)
    pub applied: u64,

    /// Board generation at the end of the run
    pub generation: u64,

    /// Board stability at the end of the run
    pub is_stable: bool,
}

impl StepReport {
    fn of(board: &Board, applied: u64) -> Self {
        Self {
            applied,
            generation: board.generation(),
            is_stable: board.is_stable(),
        }
    }
}

/// Apply up to `count` transitions, stopping once the board is stable
///
/// # Example
/// ```
/// use game_of_life_core_rs::engine::stepper::{advance_by, StepCount};
/// use game_of_life_core_rs::{Board, CellGrid};
/// use uuid::Uuid;
///
/// let blinker = CellGrid::new(vec![
///     vec![false, false, false],
///     vec![true, true, true],
///     vec![false, false, false],
/// ]).unwrap();
/// let mut board = Board::new(Uuid::new_v4(), blinker.clone());
///
/// let report = advance_by(&mut board, StepCount::new(2).unwrap());
/// assert_eq!(report.applied, 2);
/// assert_eq!(board.generation(), 3);
/// assert_eq!(board.state(), &blinker);
/// ```
pub fn advance_by(board: &mut Board, count: StepCount) -> StepReport {
    let mut applied = 0;
    while applied < count.get() && BoardPhase::of(board) == BoardPhase::Evolving {
        advance(board);
        applied += 1;
    }
    StepReport::of(board, applied)
}

/// Advance until the board is stable, giving up after `max_attempts` transitions
///
/// A board that is already stable succeeds immediately with `applied == 0`.
/// On failure the board holds the state reached after exactly
/// `max_attempts` transitions; callers decide whether to keep it.
///
/// # Errors
/// [`StepperError::NotStabilized`] when the budget runs out first.
pub fn run_to_stable(board: &mut Board, max_attempts: usize) -> Result<StepReport, StepperError> {
    let mut applied = 0;
    while BoardPhase::of(board) == BoardPhase::Evolving {
        if applied == max_attempts as u64 {
            return Err(StepperError::NotStabilized { max_attempts });
        }
        advance(board);
        applied += 1;
    }
    Ok(StepReport::of(board, applied))
}
