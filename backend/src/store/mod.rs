//! Board persistence
//!
//! The engine never touches storage. The service composes a [`BoardStore`]
//! with the engine: fetch, advance, persist.
//!
//! Implementations:
//! - [`memory::InMemoryBoardStore`] (tests, embedding)
//! - [`sqlite::SqliteBoardStore`] (CLI, durable state)

pub mod memory;
pub mod snapshot;
pub mod sqlite;

use crate::models::board::Board;
use crate::models::cells::CellGrid;
use thiserror::Error;
use uuid::Uuid;

pub use memory::InMemoryBoardStore;
pub use snapshot::{compute_state_hash, validate_snapshot, BoardSnapshot};
pub use sqlite::SqliteBoardStore;

/// Storage failures; every variant is an internal error from a caller's view
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt board record: {0}")]
    CorruptRecord(String),

    #[error("No stored board with ID {0}")]
    MissingRecord(Uuid),
}

/// Keyed storage for boards
///
/// `create` assigns the identifier. `update` only accepts boards the store
/// already knows about.
pub trait BoardStore {
    /// Fetch a board, `None` if the id is unknown
    fn get(&self, id: Uuid) -> Result<Option<Board>, StoreError>;

    /// Persist a new board at generation 1 with a fresh identifier
    fn create(&mut self, state: CellGrid) -> Result<Board, StoreError>;

    /// Overwrite the stored record for `board.id()`
    fn update(&mut self, board: &Board) -> Result<(), StoreError>;
}
