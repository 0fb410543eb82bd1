//! Draw detection for the 3x3 board.

use tracing::instrument;

use super::super::types::Board;
use super::win::check_winner;

/// Checks if the board is full (all cells occupied).
#[instrument]
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

/// Checks if the board is a completed draw: full with no winner.
#[instrument]
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && check_winner(board).is_none()
}
