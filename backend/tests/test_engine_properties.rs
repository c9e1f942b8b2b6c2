//! Property tests for the transition engine
//!
//! CRITICAL: Determinism is sacred. Same cells MUST produce same next cells.

use game_of_life_core_rs::engine::{count_live_neighbors, next_cell_state, next_generation};
use game_of_life_core_rs::{advance, Board, CellGrid};
use proptest::collection::vec;
use proptest::prelude::*;
use uuid::Uuid;

fn arb_rows() -> impl Strategy<Value = Vec<Vec<bool>>> {
    (1usize..12, 1usize..12)
        .prop_flat_map(|(rows, cols)| vec(vec(any::<bool>(), cols), rows))
}

fn arb_grid() -> impl Strategy<Value = CellGrid> {
    arb_rows().prop_map(|rows| CellGrid::new(rows).expect("generated rows are rectangular"))
}

proptest! {
    #[test]
    fn prop_next_generation_is_deterministic(grid in arb_grid()) {
        let (first, changed_first) = next_generation(&grid);
        let (second, changed_second) = next_generation(&grid);
        prop_assert_eq!(first, second);
        prop_assert_eq!(changed_first, changed_second);
    }

    #[test]
    fn prop_dimensions_preserved(grid in arb_grid()) {
        let (next, _) = next_generation(&grid);
        prop_assert_eq!(next.rows(), grid.rows());
        prop_assert_eq!(next.cols(), grid.cols());
    }

    #[test]
    fn prop_changed_count_matches_diff(grid in arb_grid()) {
        let (next, changed) = next_generation(&grid);
        let mut diff = 0;
        for r in 0..grid.rows() {
            for c in 0..grid.cols() {
                if grid.get(r, c) != next.get(r, c) {
                    diff += 1;
                }
            }
        }
        prop_assert_eq!(changed, diff);
    }

    #[test]
    fn prop_each_cell_follows_rule(grid in arb_grid()) {
        let (next, _) = next_generation(&grid);
        for r in 0..grid.rows() {
            for c in 0..grid.cols() {
                let n = count_live_neighbors(&grid, r, c);
                prop_assert!(n <= 8);
                prop_assert_eq!(next.get(r, c), next_cell_state(grid.get(r, c), n));
            }
        }
    }

    #[test]
    fn prop_advance_increments_generation_once(grid in arb_grid()) {
        let mut board = Board::new(Uuid::new_v4(), grid);
        let outcome = advance(&mut board);
        prop_assert_eq!(board.generation(), 2);
        prop_assert_eq!(outcome.generation, 2);
        prop_assert!(!outcome.skipped);
    }

    #[test]
    fn prop_stable_means_fixed_point(grid in arb_grid()) {
        let mut board = Board::new(Uuid::new_v4(), grid);
        for _ in 0..20 {
            advance(&mut board);
        }
        if board.is_stable() {
            let (next, changed) = next_generation(board.state());
            prop_assert_eq!(changed, 0);
            prop_assert_eq!(&next, board.state());
        }
    }

    #[test]
    fn prop_json_round_trip(rows in arb_rows()) {
        let grid = CellGrid::new(rows.clone()).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let restored: CellGrid = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(restored.to_rows(), rows);
    }
}
