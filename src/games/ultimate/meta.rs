//! The nested meta-game: nine boards, nine recorded outcomes.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::super::tictactoe::rules::win::LINES;
use super::super::tictactoe::{rules, Board, Mark, MoveError, Outcome};
use super::target::Target;

/// Error raised when a meta-game move fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum UltimateMoveError {
    /// The sub-board index is not within 0-8.
    #[display("Sub-board index {_0} is out of range")]
    NoSuchBoard(usize),

    /// The constraint forces a different sub-board.
    #[display("Sub-board {requested} is not the active target ({target})")]
    WrongBoard {
        /// The constraint in force.
        target: Target,
        /// The sub-board the move was aimed at.
        requested: usize,
    },

    /// The sub-board has already been decided.
    #[display("Sub-board {_0} is already decided")]
    BoardDecided(usize),

    /// The cell-level move failed.
    #[display("{_0}")]
    #[from]
    Cell(MoveError),
}

impl std::error::Error for UltimateMoveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UltimateMoveError::Cell(e) => Some(e),
            _ => None,
        }
    }
}

/// Nine sub-boards, a parallel record of their outcomes, and the active
/// sub-board constraint.
///
/// A recorded outcome is terminal: once a sub-board is decided it is
/// never recomputed, and further moves into it are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaBoard {
    boards: [Board; 9],
    outcomes: [Outcome; 9],
    target: Target,
}

impl MetaBoard {
    /// Creates an empty meta-game with no constraint in force.
    pub fn new() -> Self {
        Self {
            boards: std::array::from_fn(|_| Board::new()),
            outcomes: [Outcome::Undecided; 9],
            target: Target::Unrestricted,
        }
    }

    /// The sub-board at the given index.
    pub fn board(&self, index: usize) -> Option<&Board> {
        self.boards.get(index)
    }

    /// All nine sub-boards.
    pub fn boards(&self) -> &[Board; 9] {
        &self.boards
    }

    /// The recorded outcome of the sub-board at the given index.
    pub fn outcome(&self, index: usize) -> Option<Outcome> {
        self.outcomes.get(index).copied()
    }

    /// All nine recorded outcomes.
    pub fn outcomes(&self) -> &[Outcome; 9] {
        &self.outcomes
    }

    /// The constraint currently in force.
    pub fn target(&self) -> Target {
        self.target
    }

    /// Resolves the constraint to a concrete sub-board index.
    ///
    /// A forced target is returned as-is; under an unrestricted
    /// constraint this falls back to [`first_open_board`](Self::first_open_board).
    pub fn active_board(&self) -> Option<usize> {
        match self.target {
            Target::Board(index) => Some(index),
            Target::Unrestricted => self.first_open_board(),
        }
    }

    /// The first undecided sub-board that still has an empty cell,
    /// in ascending index order.
    pub fn first_open_board(&self) -> Option<usize> {
        (0..9).find(|&i| self.outcomes[i] == Outcome::Undecided && !self.boards[i].is_full())
    }

    /// Places `mark` on cell `cell_index` of sub-board `board_index`.
    ///
    /// On success the targeted sub-board's outcome is recorded if the move
    /// decided it, and the constraint is re-derived from the cell index:
    /// the sub-board at that index becomes the forced target if it is
    /// still undecided, otherwise the constraint relaxes.
    ///
    /// # Errors
    ///
    /// Rejects moves outside the active target, into decided sub-boards,
    /// and cell-level failures from the board model. No state changes on
    /// error.
    #[instrument(skip(self))]
    pub fn apply_move(
        &mut self,
        board_index: usize,
        cell_index: usize,
        mark: Mark,
    ) -> Result<(), UltimateMoveError> {
        if board_index >= 9 {
            return Err(UltimateMoveError::NoSuchBoard(board_index));
        }
        if !self.target.permits(board_index) {
            return Err(UltimateMoveError::WrongBoard {
                target: self.target,
                requested: board_index,
            });
        }
        if self.outcomes[board_index].is_decided() {
            return Err(UltimateMoveError::BoardDecided(board_index));
        }

        let next = self.boards[board_index].with_move(cell_index, mark)?;
        self.boards[board_index] = next;

        let outcome = rules::evaluate(&self.boards[board_index]);
        if outcome.is_decided() {
            self.outcomes[board_index] = outcome;
        }

        self.target = if self.outcomes[cell_index].is_decided() {
            Target::Unrestricted
        } else {
            Target::Board(cell_index)
        };

        Ok(())
    }

    /// Evaluates the meta-level outcome over the recorded sub-board
    /// outcomes, using the same 8 win lines as the 3x3 board.
    ///
    /// All nine sub-boards decided without a line is a meta draw.
    pub fn meta_outcome(&self) -> Outcome {
        if let Some((_, mark)) = self.meta_winning_line() {
            return Outcome::Won(mark);
        }
        if self.outcomes.iter().all(|o| o.is_decided()) {
            return Outcome::Draw;
        }
        Outcome::Undecided
    }

    /// Finds a line of three sub-boards won by the same mark.
    pub fn meta_winning_line(&self) -> Option<([usize; 3], Mark)> {
        for line in LINES {
            let [a, b, c] = line;
            if let Outcome::Won(mark) = self.outcomes[a] {
                if self.outcomes[b] == Outcome::Won(mark) && self.outcomes[c] == Outcome::Won(mark)
                {
                    return Some((line, mark));
                }
            }
        }
        None
    }

    /// Clears every sub-board, outcome and the constraint.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for MetaBoard {
    fn default() -> Self {
        Self::new()
    }
}
