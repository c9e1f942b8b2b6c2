//! Snapshot - persisted form of a board
//!
//! Every stored board carries a SHA-256 hash of its cells so that a record
//! edited or damaged outside the service is detected on load instead of
//! being simulated.
//!
//! # Critical Invariants
//!
//! - **Shape**: the stored matrix passes [`CellGrid`] validation
//! - **Generation**: at least [`INITIAL_GENERATION`]
//! - **Stability**: a board marked stable is a fixed point of the rule
//! - **Integrity**: `state_hash` matches the stored matrix

use crate::engine::transition::next_generation;
use crate::models::board::{Board, INITIAL_GENERATION};
use crate::models::cells::CellGrid;
use crate::store::StoreError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

// ============================================================================
// Snapshot Structure
// ============================================================================

/// Board record as written to a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub id: Uuid,
    pub state: CellGrid,
    pub generation: u64,
    pub is_stable: bool,
    /// Hex SHA-256 of the canonical JSON of `state`
    pub state_hash: String,
}

impl BoardSnapshot {
    pub fn capture(board: &Board) -> Result<Self, StoreError> {
        Ok(Self {
            id: board.id(),
            state: board.state().clone(),
            generation: board.generation(),
            is_stable: board.is_stable(),
            state_hash: compute_state_hash(board.state())?,
        })
    }
}

impl From<BoardSnapshot> for Board {
    fn from(snapshot: BoardSnapshot) -> Self {
        Board::restore(
            snapshot.id,
            snapshot.state,
            snapshot.generation,
            snapshot.is_stable,
        )
    }
}

// ============================================================================
// State Hashing
// ============================================================================

/// Deterministic SHA-256 of a matrix
///
/// Hashes the compact JSON array-of-arrays form, which is the same text the
/// SQLite store writes.
pub fn compute_state_hash(state: &CellGrid) -> Result<String, StoreError> {
    let json = serde_json::to_string(state)?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

// ============================================================================
// Validation
// ============================================================================

/// Check a snapshot before turning it back into a [`Board`]
pub fn validate_snapshot(snapshot: &BoardSnapshot) -> Result<(), StoreError> {
    if snapshot.generation < INITIAL_GENERATION {
        return Err(StoreError::CorruptRecord(format!(
            "board {} has generation {}, expected at least {}",
            snapshot.id, snapshot.generation, INITIAL_GENERATION
        )));
    }

    let expected_hash = compute_state_hash(&snapshot.state)?;
    if expected_hash != snapshot.state_hash {
        return Err(StoreError::CorruptRecord(format!(
            "board {} state hash mismatch: stored {}, computed {}",
            snapshot.id, snapshot.state_hash, expected_hash
        )));
    }

    if snapshot.is_stable {
        let (_, cells_changed) = next_generation(&snapshot.state);
        if cells_changed != 0 {
            return Err(StoreError::CorruptRecord(format!(
                "board {} is marked stable but {} cells would change",
                snapshot.id, cells_changed
            )));
        }
    }

    Ok(())
}
