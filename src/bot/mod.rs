//! Bot move selection under the three difficulty policies.

mod minimax;

use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::games::tictactoe::{rules, Board, Mark};

/// How hard the bot tries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Uniformly random among empty cells.
    Easy,
    /// Takes an immediate win, blocks an immediate loss, else random.
    Medium,
    /// Exhaustive minimax; never loses.
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// Error raised when the bot is invoked without a legal move.
///
/// Terminal-state checks gate bot invocation, so hitting this is an
/// invariant violation rather than a user-facing condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum BotError {
    /// Every cell is occupied.
    #[display("No legal move: the board is full")]
    NoLegalMove,
}

impl std::error::Error for BotError {}

/// Selects the bot's next cell on a single 3x3 board.
///
/// In the Ultimate variant this is called against whichever sub-board is
/// the legal target; the engine knows nothing of the meta-game.
///
/// # Errors
///
/// Returns [`BotError::NoLegalMove`] if the board is full.
#[instrument(skip(board))]
pub fn select_move(
    board: &Board,
    difficulty: Difficulty,
    bot: Mark,
    opponent: Mark,
) -> Result<usize, BotError> {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return Err(BotError::NoLegalMove);
    }

    let choice = match difficulty {
        Difficulty::Easy => random_cell(&empty)?,
        Difficulty::Medium => winning_cell(board, bot)
            .or_else(|| winning_cell(board, opponent))
            .map_or_else(|| random_cell(&empty), Ok)?,
        Difficulty::Hard => minimax::best_move(board, bot).ok_or(BotError::NoLegalMove)?,
    };

    debug!(%difficulty, %bot, cell = choice, "Bot selected move");
    Ok(choice)
}

/// Uniform choice among the given cells.
fn random_cell(empty: &[usize]) -> Result<usize, BotError> {
    let mut rng = rand::rng();
    empty.choose(&mut rng).copied().ok_or(BotError::NoLegalMove)
}

/// Finds a cell that completes a line for `mark`, probing each empty
/// cell against a copy of the board.
fn winning_cell(board: &Board, mark: Mark) -> Option<usize> {
    board.empty_cells().into_iter().find(|&index| {
        board
            .with_move(index, mark)
            .map(|probe| rules::check_winner(&probe) == Some(mark))
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_winning_cell_finds_completion() {
        let board = Board::new()
            .with_move(0, Mark::O)
            .and_then(|b| b.with_move(1, Mark::O))
            .unwrap();
        assert_eq!(winning_cell(&board, Mark::O), Some(2));
        assert_eq!(winning_cell(&board, Mark::X), None);
    }

    #[test]
    fn test_full_board_has_no_move() {
        let marks = [
            Mark::X,
            Mark::O,
            Mark::X,
            Mark::X,
            Mark::O,
            Mark::O,
            Mark::O,
            Mark::X,
            Mark::X,
        ];
        let mut board = Board::new();
        for (index, mark) in marks.into_iter().enumerate() {
            board = board.with_move(index, mark).unwrap();
        }
        for difficulty in Difficulty::iter() {
            assert_eq!(
                select_move(&board, difficulty, Mark::O, Mark::X),
                Err(BotError::NoLegalMove)
            );
        }
    }
}
