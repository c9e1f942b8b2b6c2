//! In-memory board store

use crate::models::board::Board;
use crate::models::cells::CellGrid;
use crate::store::{BoardStore, StoreError};
use std::collections::HashMap;
use uuid::Uuid;

/// `HashMap`-backed store; contents live as long as the value
#[derive(Debug, Default, Clone)]
pub struct InMemoryBoardStore {
    boards: HashMap<Uuid, Board>,
}

impl InMemoryBoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

impl BoardStore for InMemoryBoardStore {
    fn get(&self, id: Uuid) -> Result<Option<Board>, StoreError> {
        Ok(self.boards.get(&id).cloned())
    }

    fn create(&mut self, state: CellGrid) -> Result<Board, StoreError> {
        let board = Board::new(Uuid::new_v4(), state);
        self.boards.insert(board.id(), board.clone());
        Ok(board)
    }

    fn update(&mut self, board: &Board) -> Result<(), StoreError> {
        match self.boards.get_mut(&board.id()) {
            Some(stored) => {
                *stored = board.clone();
                Ok(())
            }
            None => Err(StoreError::MissingRecord(board.id())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send<T: Send>() {}

    #[test]
    fn test_boards_and_store_are_send() {
        assert_send::<Board>();
        assert_send::<CellGrid>();
        assert_send::<InMemoryBoardStore>();
    }

    #[test]
    fn test_create_assigns_distinct_ids() {
        let mut store = InMemoryBoardStore::new();
        let a = store.create(CellGrid::dead(2, 2)).unwrap();
        let b = store.create(CellGrid::dead(2, 2)).unwrap();

        assert_ne!(a.id(), b.id());
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(a.id()).unwrap(), Some(a));
    }

    #[test]
    fn test_get_unknown_returns_none() {
        let store = InMemoryBoardStore::new();
        assert!(store.get(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_update_unknown_rejected() {
        let mut store = InMemoryBoardStore::new();
        let stray = Board::new(Uuid::new_v4(), CellGrid::dead(1, 1));
        assert!(matches!(
            store.update(&stray),
            Err(StoreError::MissingRecord(id)) if id == stray.id()
        ));
    }
}
