//! Tests for the 3x3 board model and rules.

use tictac_rooms::{rules, Board, Cell, Mark, MoveError, Outcome};

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

fn has_line(board: &Board, mark: Mark) -> bool {
    LINES
        .iter()
        .any(|line| line.iter().all(|&i| board.get(i) == Some(Cell::Occupied(mark))))
}

#[test]
fn test_with_move_is_pure() {
    let board = Board::new().with_move(4, Mark::X).unwrap();
    let before = board.clone();
    let after = board.with_move(0, Mark::O).unwrap();
    assert_eq!(board, before, "Input board must not be mutated");
    assert_eq!(after.get(0), Some(Cell::Occupied(Mark::O)));
    assert_eq!(board.get(0), Some(Cell::Empty));
}

#[test]
fn test_with_move_rejects_out_of_range() {
    let board = Board::new();
    assert_eq!(
        board.with_move(9, Mark::X),
        Err(MoveError::OutOfBounds(9))
    );
}

#[test]
fn test_with_move_rejects_occupied_cell() {
    let board = Board::new().with_move(4, Mark::X).unwrap();
    assert_eq!(
        board.with_move(4, Mark::O),
        Err(MoveError::CellOccupied(4))
    );
}

#[test]
fn test_empty_cells_ascending() {
    let board = Board::new()
        .with_move(3, Mark::X)
        .and_then(|b| b.with_move(7, Mark::O))
        .unwrap();
    assert_eq!(board.empty_cells(), vec![0, 1, 2, 4, 5, 6, 8]);
}

#[test]
fn test_winning_line_reports_completed_triple() {
    let board = Board::new()
        .with_move(2, Mark::O)
        .and_then(|b| b.with_move(5, Mark::O))
        .and_then(|b| b.with_move(8, Mark::O))
        .unwrap();
    assert_eq!(rules::winning_line(&board), Some(([2, 5, 8], Mark::O)));
    assert_eq!(rules::evaluate(&board), Outcome::Won(Mark::O));
}

/// Walks every legal game from the empty board, checking the outcome
/// invariants at each reachable position.
#[test]
fn test_outcome_invariants_over_all_reachable_boards() {
    fn explore(board: &Board, to_move: Mark, positions: &mut u64) {
        *positions += 1;

        let has_empty = !board.empty_cells().is_empty();
        let x_wins = has_line(board, Mark::X);
        let o_wins = has_line(board, Mark::O);

        // At most one mark can hold a completed line in a legal game.
        assert!(!(x_wins && o_wins), "Both marks won:\n{}", board.display());

        // Undecided iff an empty cell remains and no line is complete.
        let outcome = rules::evaluate(board);
        assert_eq!(
            outcome == Outcome::Undecided,
            has_empty && !x_wins && !o_wins
        );

        if outcome.is_decided() {
            return;
        }
        for index in board.empty_cells() {
            let child = board.with_move(index, to_move).unwrap();
            explore(&child, to_move.opponent(), positions);
        }
    }

    let mut positions = 0;
    explore(&Board::new(), Mark::X, &mut positions);
    assert!(positions > 100_000, "Expected an exhaustive walk");
}

#[test]
fn test_display_shows_marks_and_slots() {
    let board = Board::new().with_move(4, Mark::X).unwrap();
    let text = board.display();
    assert!(text.contains('X'));
    assert!(text.contains('1'), "Empty cells show their slot number");
}
