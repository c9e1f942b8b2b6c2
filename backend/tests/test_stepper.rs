//! Bounded Stepper Tests
//!
//! - "Advance by N" stops early on stability
//! - "Run to final state" never exceeds its attempt budget
//! - Non-positive counts are rejected before any transition

use game_of_life_core_rs::{
    advance_by, run_to_stable, Board, BoardPhase, CellGrid, StepCount, StepperError,
};
use uuid::Uuid;

fn board(rows: &[&str]) -> Board {
    let cells = CellGrid::new(
        rows.iter()
            .map(|r| r.chars().map(|c| c == '#').collect())
            .collect(),
    )
    .expect("test grid must be rectangular");
    Board::new(Uuid::new_v4(), cells)
}

fn blinker() -> Board {
    board(&[".....", ".....", ".###.", ".....", "....."])
}

/// Dies in one step, confirmed stable on the next
fn lone_cell() -> Board {
    board(&["...", ".#.", "..."])
}

// ============================================================================
// Advance By Count
// ============================================================================

#[test]
fn test_advance_by_applies_exact_count_when_evolving() {
    let mut b = blinker();
    let report = advance_by(&mut b, StepCount::new(7).unwrap());

    assert_eq!(report.applied, 7);
    assert_eq!(report.generation, 8);
    assert!(!report.is_stable);
    assert_eq!(b.generation(), 8);
}

#[test]
fn test_advance_by_stops_at_first_stability() {
    let mut b = lone_cell();
    let report = advance_by(&mut b, StepCount::new(50).unwrap());

    assert_eq!(report.applied, 2);
    assert_eq!(report.generation, 3);
    assert!(report.is_stable);
}

#[test]
fn test_advance_by_on_stable_board_is_noop() {
    let mut b = lone_cell();
    run_to_stable(&mut b, 10).unwrap();
    let settled = b.clone();

    let report = advance_by(&mut b, StepCount::new(5).unwrap());

    assert_eq!(report.applied, 0);
    assert_eq!(b, settled);
}

#[test]
fn test_step_count_validation_happens_before_any_advance() {
    let b = blinker();

    assert_eq!(StepCount::new(0), Err(StepperError::NonPositiveStepCount(0)));
    assert_eq!(StepCount::new(-1), Err(StepperError::NonPositiveStepCount(-1)));
    assert_eq!(b.generation(), 1);
}

// ============================================================================
// Run To Stable
// ============================================================================

#[test]
fn test_run_to_stable_returns_stable_board() {
    let mut b = lone_cell();
    let report = run_to_stable(&mut b, 1000).unwrap();

    assert!(report.is_stable);
    assert_eq!(BoardPhase::of(&b), BoardPhase::Stable);
    assert_eq!(b.state().live_cells(), 0);
}

#[test]
fn test_run_to_stable_bound_is_exact() {
    for k in [1usize, 2, 5, 17] {
        let mut b = blinker();
        let result = run_to_stable(&mut b, k);

        assert_eq!(result, Err(StepperError::NotStabilized { max_attempts: k }));
        // exactly k applications, never more
        assert_eq!(b.generation(), 1 + k as u64);
    }
}

#[test]
fn test_run_to_stable_already_stable_applies_nothing() {
    let mut b = lone_cell();
    run_to_stable(&mut b, 10).unwrap();
    let generation = b.generation();

    let report = run_to_stable(&mut b, 1).unwrap();

    assert_eq!(report.applied, 0);
    assert_eq!(b.generation(), generation);
}

#[test]
fn test_run_to_stable_reaches_stability_on_last_attempt() {
    let mut b = lone_cell();
    let report = run_to_stable(&mut b, 2).unwrap();
    assert_eq!(report.applied, 2);

    let mut b = lone_cell();
    assert_eq!(
        run_to_stable(&mut b, 1),
        Err(StepperError::NotStabilized { max_attempts: 1 })
    );
}

#[test]
fn test_glider_settles_into_corner_block() {
    // On a bounded grid a glider runs into the corner and freezes as a block
    let mut b = board(&[
        ".#......", "..#.....", "###.....", "........", "........", "........", "........",
        "........",
    ]);
    let report = run_to_stable(&mut b, 1000).unwrap();

    assert!(report.is_stable);
    assert_eq!(b.state().live_cells(), 4);
}

#[test]
fn test_not_stabilized_message_carries_bound() {
    let err = StepperError::NotStabilized { max_attempts: 1000 };
    assert_eq!(
        err.to_string(),
        "Board did not reach a stable state after 1000 attempts"
    );
}
