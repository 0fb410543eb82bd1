//! Exhaustive minimax search for the hard difficulty.
//!
//! The search recurses over immutable board values produced by
//! [`Board::with_move`]; no shared buffer is mutated across calls, so a
//! probed line of play can never leak into a sibling branch.

use super::super::games::tictactoe::{rules, Board, Mark, Outcome};

/// Picks the empty cell whose subtree scores best for the bot.
///
/// Cells are tried in ascending index order and the first-encountered
/// best score wins ties, so selection is deterministic for a given board.
/// Returns `None` only when the board has no empty cell.
pub(crate) fn best_move(board: &Board, bot: Mark) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;
    for index in board.empty_cells() {
        let Ok(child) = board.with_move(index, bot) else {
            continue;
        };
        let value = score(&child, bot, bot.opponent(), 1);
        if best.is_none_or(|(_, top)| value > top) {
            best = Some((index, value));
        }
    }
    best.map(|(index, _)| index)
}

/// Scores a position from the bot's perspective.
///
/// A bot win scores `10 - depth`, an opponent win `depth - 10`, a draw 0;
/// depth counts moves from the root, so faster wins and slower losses
/// score better. The bot maximizes, the opponent minimizes.
fn score(board: &Board, bot: Mark, to_move: Mark, depth: i32) -> i32 {
    match rules::evaluate(board) {
        Outcome::Won(mark) if mark == bot => 10 - depth,
        Outcome::Won(_) => depth - 10,
        Outcome::Draw => 0,
        Outcome::Undecided => {
            let maximizing = to_move == bot;
            let mut best = if maximizing { i32::MIN } else { i32::MAX };
            for index in board.empty_cells() {
                let Ok(child) = board.with_move(index, to_move) else {
                    continue;
                };
                let value = score(&child, bot, to_move.opponent(), depth + 1);
                best = if maximizing {
                    best.max(value)
                } else {
                    best.min(value)
                };
            }
            best
        }
    }
}
