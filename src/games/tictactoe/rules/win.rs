//! Win detection for the 3x3 board.

use tracing::instrument;

use super::super::types::{Board, Cell, Mark};

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
pub(crate) const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks if there is a winner on the board.
///
/// Returns `Some(mark)` if the mark holds three in a row, `None` otherwise.
/// With more than one completed line (unreachable under legal move
/// sequencing) the first line in table order is reported.
#[instrument]
pub fn check_winner(board: &Board) -> Option<Mark> {
    winning_line(board).map(|(_, mark)| mark)
}

/// Finds a completed line and the mark that owns it.
///
/// The cell indices are returned so a caller can highlight the line.
#[instrument]
pub fn winning_line(board: &Board) -> Option<([usize; 3], Mark)> {
    for line in LINES {
        let [a, b, c] = line;
        let cell = board.get(a)?;
        if cell != Cell::Empty && board.get(b) == Some(cell) && board.get(c) == Some(cell) {
            if let Cell::Occupied(mark) = cell {
                return Some((line, mark));
            }
        }
    }
    None
}
