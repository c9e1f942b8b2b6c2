//! Game of Life Core - Rust Engine
//!
//! Conway's Game of Life as a service: boards are uploaded once, then
//! advanced generation by generation with their state persisted between
//! calls.
//!
//! # Architecture
//!
//! - **core**: Configuration (attempt budget, environment, database path)
//! - **models**: Domain types (CellGrid, Board)
//! - **engine**: Generation transitions and the bounded stepper
//! - **store**: Board persistence (in-memory, SQLite)
//! - **service**: Fetch/advance/persist operations
//! - **api**: Request routing and response shaping
//!
//! # Critical Invariants
//!
//! 1. Grids are rectangular and non-empty from construction on
//! 2. Each generation is computed from a fully materialized previous one
//! 3. A stable board never changes again

// Module declarations
pub mod api;
pub mod core;
pub mod engine;
pub mod models;
pub mod service;
pub mod store;

// Re-exports for convenience
pub use crate::core::config::{
    ConfigError, Environment, ServiceConfig, SimulationSettings, DEFAULT_MAX_SIMULATION_ATTEMPTS,
};
pub use api::{handle, ApiRequest, ApiResponse, RouteError, StatusCode};
pub use engine::{
    advance, advance_by, run_to_stable, BoardPhase, StepCount, StepReport, StepperError,
    TransitionOutcome,
};
pub use models::{Board, CellGrid, GridError};
pub use service::{BoardService, ServiceError};
pub use store::{BoardStore, InMemoryBoardStore, SqliteBoardStore, StoreError};
