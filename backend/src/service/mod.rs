//! Board service - fetch, advance, persist
//!
//! Composes a [`BoardStore`] with the engine. Every operation validates its
//! input before touching the store, and the engine only ever sees boards
//! that came out of the store.
//!
//! Persistence rules:
//! - `next_state` persists the advanced board (also when it was a no-op)
//! - `states_ahead` persists once, after the stepper finishes
//! - `final_state` persists only when the board stabilized; on failure the
//!   stored record keeps the state it had before the call

use crate::core::config::SimulationSettings;
use crate::engine::stepper::{advance_by, run_to_stable, StepCount, StepperError};
use crate::engine::transition::advance;
use crate::models::board::Board;
use crate::models::cells::{CellGrid, GridError};
use crate::store::{BoardStore, StoreError};
use thiserror::Error;
use uuid::Uuid;

/// Everything a service operation can fail with
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid initial state: {0}")]
    InvalidState(#[from] GridError),

    #[error("Number of states must be positive, got {0}")]
    InvalidStepCount(i64),

    #[error("Board with ID {0} not found.")]
    BoardNotFound(Uuid),

    #[error("Board did not reach a stable state after {max_attempts} attempts.")]
    NotStabilized { max_attempts: usize },

    #[error("Store failure: {0}")]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// True for failures the caller did not cause
    pub fn is_internal(&self) -> bool {
        matches!(self, ServiceError::Store(_))
    }
}

impl From<StepperError> for ServiceError {
    fn from(err: StepperError) -> Self {
        match err {
            StepperError::NonPositiveStepCount(count) => ServiceError::InvalidStepCount(count),
            StepperError::NotStabilized { max_attempts } => {
                ServiceError::NotStabilized { max_attempts }
            }
        }
    }
}

/// Game of Life operations over a store
///
/// Mutating operations take `&mut self`, so a single service instance runs
/// at most one fetch/advance/persist cycle at a time.
pub struct BoardService<S: BoardStore> {
    store: S,
    settings: SimulationSettings,
}

impl<S: BoardStore> BoardService<S> {
    pub fn new(store: S, settings: SimulationSettings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate an uploaded matrix and store it as a new board
    pub fn upload(&mut self, initial_state: Vec<Vec<bool>>) -> Result<Board, ServiceError> {
        let cells = CellGrid::new(initial_state).map_err(|e| {
            tracing::warn!(error = %e, "rejected initial state");
            e
        })?;

        let board = self.store.create(cells)?;
        tracing::info!(
            board_id = %board.id(),
            rows = board.state().rows(),
            cols = board.state().cols(),
            "created board"
        );
        Ok(board)
    }

    /// Fetch a board without advancing it
    pub fn get(&self, id: Uuid) -> Result<Board, ServiceError> {
        self.store.get(id)?.ok_or(ServiceError::BoardNotFound(id))
    }

    /// Advance one generation and persist
    pub fn next_state(&mut self, id: Uuid) -> Result<Board, ServiceError> {
        let mut board = self.get(id)?;
        let outcome = advance(&mut board);
        self.store.update(&board)?;

        tracing::info!(
            board_id = %id,
            generation = outcome.generation,
            is_stable = outcome.is_stable,
            "next state"
        );
        Ok(board)
    }

    /// Advance up to `count` generations (stopping early on stability) and persist
    pub fn states_ahead(&mut self, id: Uuid, count: i64) -> Result<Board, ServiceError> {
        let count = StepCount::new(count)?;
        let mut board = self.get(id)?;

        let report = advance_by(&mut board, count);
        self.store.update(&board)?;

        tracing::info!(
            board_id = %id,
            requested = count.get(),
            applied = report.applied,
            generation = report.generation,
            is_stable = report.is_stable,
            "advanced board by count"
        );
        Ok(board)
    }

    /// Run to a fixed point within the configured attempt budget
    pub fn final_state(&mut self, id: Uuid) -> Result<Board, ServiceError> {
        let max_attempts = self.settings.max_simulation_attempts;
        let mut board = self.get(id)?;

        match run_to_stable(&mut board, max_attempts) {
            Ok(report) => {
                self.store.update(&board)?;
                tracing::info!(
                    board_id = %id,
                    applied = report.applied,
                    generation = report.generation,
                    "board reached final state"
                );
                Ok(board)
            }
            Err(err) => {
                tracing::warn!(board_id = %id, max_attempts, "board did not stabilize");
                Err(err.into())
            }
        }
    }
}
