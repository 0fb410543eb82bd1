//! Tests for the bot engine across the three difficulty policies.

use rand::seq::IndexedRandom;
use tictac_rooms::{rules, select_move, Board, Difficulty, Mark, Outcome};

fn board_from(moves: &[(usize, Mark)]) -> Board {
    let mut board = Board::new();
    for &(index, mark) in moves {
        board = board.with_move(index, mark).unwrap();
    }
    board
}

#[test]
fn test_easy_picks_a_legal_cell() {
    let board = board_from(&[(0, Mark::X), (4, Mark::O), (8, Mark::X)]);
    for _ in 0..20 {
        let cell = select_move(&board, Difficulty::Easy, Mark::O, Mark::X).unwrap();
        assert!(board.is_empty(cell));
    }
}

#[test]
fn test_medium_takes_immediate_win_over_block() {
    // O can win at 5 (3-4-5); X threatens 0-1-2. The win comes first.
    let board = board_from(&[
        (0, Mark::X),
        (1, Mark::X),
        (3, Mark::O),
        (4, Mark::O),
    ]);
    let cell = select_move(&board, Difficulty::Medium, Mark::O, Mark::X).unwrap();
    assert_eq!(cell, 5);
}

#[test]
fn test_medium_blocks_single_threat() {
    // X threatens 0-1-2 at cell 2; O has no immediate win anywhere.
    let board = board_from(&[(0, Mark::X), (1, Mark::X), (4, Mark::O)]);
    let cell = select_move(&board, Difficulty::Medium, Mark::O, Mark::X).unwrap();
    assert_eq!(cell, 2, "Medium must block the only winning cell");
}

#[test]
fn test_medium_blocks_column_threat() {
    let board = board_from(&[(1, Mark::X), (4, Mark::X), (0, Mark::O)]);
    let cell = select_move(&board, Difficulty::Medium, Mark::O, Mark::X).unwrap();
    assert_eq!(cell, 7);
}

#[test]
fn test_hard_reply_to_center_is_a_corner() {
    let board = Board::new().with_move(4, Mark::X).unwrap();
    let reply = select_move(&board, Difficulty::Hard, Mark::O, Mark::X).unwrap();
    assert_eq!(reply, 0, "First-encountered drawing reply is the top-left corner");
}

/// Plays a full game where both sides use the hard policy.
fn hard_self_play(opening: usize) -> Outcome {
    let mut board = Board::new().with_move(opening, Mark::X).unwrap();
    let mut to_move = Mark::O;
    loop {
        let outcome = rules::evaluate(&board);
        if outcome.is_decided() {
            return outcome;
        }
        let cell = select_move(&board, Difficulty::Hard, to_move, to_move.opponent()).unwrap();
        board = board.with_move(cell, to_move).unwrap();
        to_move = to_move.opponent();
    }
}

#[test]
fn test_hard_versus_hard_draws_from_every_opening() {
    for opening in 0..9 {
        assert_eq!(
            hard_self_play(opening),
            Outcome::Draw,
            "Opening {} should be held to a draw",
            opening
        );
    }
}

#[test]
fn test_hard_bot_never_loses_to_random_play() {
    let mut rng = rand::rng();
    for _ in 0..150 {
        let mut board = Board::new();
        let mut to_move = Mark::X;
        loop {
            let outcome = rules::evaluate(&board);
            if outcome.is_decided() {
                assert_ne!(
                    outcome,
                    Outcome::Won(Mark::X),
                    "Hard bot lost:\n{}",
                    board.display()
                );
                break;
            }
            let cell = if to_move == Mark::X {
                *board.empty_cells().choose(&mut rng).unwrap()
            } else {
                select_move(&board, Difficulty::Hard, Mark::O, Mark::X).unwrap()
            };
            board = board.with_move(cell, to_move).unwrap();
            to_move = to_move.opponent();
        }
    }
}

#[test]
fn test_center_then_corner_line_never_beats_hard_bot() {
    // Human X opens center, bot O answers, X takes a corner; from there
    // the bot holds against perfect play.
    let board = Board::new().with_move(4, Mark::X).unwrap();
    let reply = select_move(&board, Difficulty::Hard, Mark::O, Mark::X).unwrap();
    let board = board.with_move(reply, Mark::O).unwrap();
    let corner = [0usize, 2, 6, 8]
        .into_iter()
        .find(|&c| board.is_empty(c))
        .unwrap();
    let mut board = board.with_move(corner, Mark::X).unwrap();
    let mut to_move = Mark::O;
    loop {
        let outcome = rules::evaluate(&board);
        if outcome.is_decided() {
            assert_ne!(outcome, Outcome::Won(Mark::X));
            break;
        }
        let mover = to_move;
        let cell = select_move(&board, Difficulty::Hard, mover, mover.opponent()).unwrap();
        board = board.with_move(cell, mover).unwrap();
        to_move = to_move.opponent();
    }
}
