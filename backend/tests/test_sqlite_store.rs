//! SQLite Store Tests
//!
//! Durable persistence of boards:
//! - Boards survive closing and reopening the database
//! - Updates overwrite generation, cells and stability
//! - Unknown ids are reported, not invented

use game_of_life_core_rs::{
    advance, BoardService, BoardStore, CellGrid, SimulationSettings, SqliteBoardStore, StoreError,
};
use tempfile::TempDir;
use uuid::Uuid;

fn blinker() -> CellGrid {
    CellGrid::new(vec![
        vec![false, false, false],
        vec![true, true, true],
        vec![false, false, false],
    ])
    .unwrap()
}

#[test]
fn test_board_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("boards.db");

    let board = {
        let mut store = SqliteBoardStore::open(&path).unwrap();
        store.create(blinker()).unwrap()
    };

    let store = SqliteBoardStore::open(&path).unwrap();
    let loaded = store.get(board.id()).unwrap().expect("board should persist");

    assert_eq!(loaded, board);
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn test_open_creates_missing_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("state").join("boards.db");

    let mut store = SqliteBoardStore::open(&path).unwrap();
    store.create(blinker()).unwrap();

    assert!(path.exists());
}

#[test]
fn test_update_overwrites_record() {
    let mut store = SqliteBoardStore::open_in_memory().unwrap();
    let mut board = store.create(blinker()).unwrap();

    advance(&mut board);
    store.update(&board).unwrap();

    let loaded = store.get(board.id()).unwrap().unwrap();
    assert_eq!(loaded.generation(), 2);
    assert_eq!(loaded.state(), board.state());
    assert!(!loaded.is_stable());
}

#[test]
fn test_stable_flag_round_trips() {
    let mut store = SqliteBoardStore::open_in_memory().unwrap();
    let mut board = store
        .create(CellGrid::new(vec![vec![true, true], vec![true, true]]).unwrap())
        .unwrap();

    advance(&mut board);
    store.update(&board).unwrap();

    let loaded = store.get(board.id()).unwrap().unwrap();
    assert!(loaded.is_stable());
    assert_eq!(loaded.generation(), 2);
}

#[test]
fn test_get_unknown_returns_none() {
    let store = SqliteBoardStore::open_in_memory().unwrap();
    assert!(store.get(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn test_update_unknown_is_missing_record() {
    let mut source = SqliteBoardStore::open_in_memory().unwrap();
    let board = source.create(blinker()).unwrap();

    let mut other = SqliteBoardStore::open_in_memory().unwrap();
    assert!(matches!(
        other.update(&board),
        Err(StoreError::MissingRecord(id)) if id == board.id()
    ));
}

#[test]
fn test_service_over_sqlite_across_sessions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("boards.db");

    let id = {
        let store = SqliteBoardStore::open(&path).unwrap();
        let mut service = BoardService::new(store, SimulationSettings::default());
        let id = service.upload(blinker().to_rows()).unwrap().id();
        service.states_ahead(id, 3).unwrap();
        id
    };

    let store = SqliteBoardStore::open(&path).unwrap();
    let mut service = BoardService::new(store, SimulationSettings::default());

    let board = service.next_state(id).unwrap();
    assert_eq!(board.generation(), 5);
    assert_eq!(board.state(), &blinker());
}
