//! SQLite-backed board store
//!
//! One row per board. The matrix is stored as compact JSON text together
//! with its SHA-256, and every row is validated on load (see
//! [`validate_snapshot`]).

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::models::board::Board;
use crate::models::cells::CellGrid;
use crate::store::snapshot::{validate_snapshot, BoardSnapshot};
use crate::store::{BoardStore, StoreError};

/// Durable store over a single SQLite connection
pub struct SqliteBoardStore {
    db: Connection,
}

impl SqliteBoardStore {
    const SCHEMA: &'static str = r"
        CREATE TABLE IF NOT EXISTS boards (
            id TEXT PRIMARY KEY,
            state TEXT NOT NULL,
            generation INTEGER NOT NULL,
            is_stable INTEGER NOT NULL,
            state_hash TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
    ";

    /// Open or create a board database at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "opened board database");
        Self::initialize(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::initialize(Connection::open_in_memory()?)
    }

    fn initialize(db: Connection) -> Result<Self, StoreError> {
        db.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=FULL;")?;
        db.execute_batch(Self::SCHEMA)?;
        Ok(Self { db })
    }

    /// Number of stored boards
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .db
            .query_row("SELECT COUNT(*) FROM boards", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn write_new(&self, snapshot: &BoardSnapshot) -> Result<(), StoreError> {
        let state = serde_json::to_string(&snapshot.state)?;
        self.db.execute(
            "INSERT INTO boards (id, state, generation, is_stable, state_hash, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))",
            params![
                snapshot.id.to_string(),
                state,
                snapshot.generation as i64,
                snapshot.is_stable,
                snapshot.state_hash,
            ],
        )?;
        Ok(())
    }
}

impl BoardStore for SqliteBoardStore {
    fn get(&self, id: Uuid) -> Result<Option<Board>, StoreError> {
        let row = self
            .db
            .query_row(
                "SELECT state, generation, is_stable, state_hash FROM boards WHERE id = ?1",
                params![id.to_string()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, bool>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;

        let Some((state, generation, is_stable, state_hash)) = row else {
            return Ok(None);
        };

        let generation = u64::try_from(generation).map_err(|_| {
            StoreError::CorruptRecord(format!("board {} has negative generation {}", id, generation))
        })?;
        let snapshot = BoardSnapshot {
            id,
            state: serde_json::from_str(&state)?,
            generation,
            is_stable,
            state_hash,
        };
        validate_snapshot(&snapshot)?;

        Ok(Some(snapshot.into()))
    }

    fn create(&mut self, state: CellGrid) -> Result<Board, StoreError> {
        let board = Board::new(Uuid::new_v4(), state);
        self.write_new(&BoardSnapshot::capture(&board)?)?;
        tracing::debug!(board_id = %board.id(), "stored new board");
        Ok(board)
    }

    fn update(&mut self, board: &Board) -> Result<(), StoreError> {
        let snapshot = BoardSnapshot::capture(board)?;
        let state = serde_json::to_string(&snapshot.state)?;

        let updated = self.db.execute(
            "UPDATE boards
             SET state = ?2, generation = ?3, is_stable = ?4, state_hash = ?5,
                 updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
             WHERE id = ?1",
            params![
                snapshot.id.to_string(),
                state,
                snapshot.generation as i64,
                snapshot.is_stable,
                snapshot.state_hash,
            ],
        )?;

        if updated == 0 {
            return Err(StoreError::MissingRecord(board.id()));
        }
        Ok(())
    }
}
