//! Domain models for the Game of Life service

pub mod board;
pub mod cells;

// Re-exports
pub use board::{Board, INITIAL_GENERATION};
pub use cells::{CellGrid, GridError};
