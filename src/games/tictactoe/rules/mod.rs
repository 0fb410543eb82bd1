//! Game rules for the 3x3 board.
//!
//! Pure functions for evaluating board state. [`evaluate`] is the single
//! authoritative terminal check; controllers and the session mirror both
//! call it rather than re-deriving win or draw status inline.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{check_winner, winning_line};

use tracing::instrument;

use super::types::{Board, Outcome};

/// Evaluates the terminal status of a board.
///
/// Checks the 8 winning lines first, then reports a draw when no empty
/// cell remains; otherwise the board is still undecided.
#[instrument]
pub fn evaluate(board: &Board) -> Outcome {
    if let Some(mark) = check_winner(board) {
        return Outcome::Won(mark);
    }
    if is_full(board) {
        return Outcome::Draw;
    }
    Outcome::Undecided
}
