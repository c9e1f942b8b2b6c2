//! Engine - generation transitions and the bounded stepper
//!
//! `transition` holds the rule itself; `stepper` composes it into the
//! "advance by N" and "run to fixed point" drivers.

pub mod stepper;
pub mod transition;

pub use stepper::{advance_by, run_to_stable, BoardPhase, StepCount, StepReport, StepperError};
pub use transition::{
    advance, count_live_neighbors, next_cell_state, next_generation, TransitionOutcome,
};
