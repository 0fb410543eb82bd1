//! Core domain types for the 3x3 board.

use serde::{Deserialize, Serialize};

/// Error raised when a move fails local validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The cell index is not within 0-8.
    #[display("Cell index {_0} is out of range")]
    OutOfBounds(usize),

    /// The target cell already holds a mark.
    #[display("Cell {_0} is already occupied")]
    CellOccupied(usize),
}

impl std::error::Error for MoveError {}

/// A player's mark on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// The X mark (moves first).
    X,
    /// The O mark (moves second).
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// A single cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing placed here yet.
    Empty,
    /// Cell holding a player's mark.
    Occupied(Mark),
}

/// 3x3 board with cells in row-major order (0-8).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Creates a board directly from nine cells.
    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Checks if the cell at the given index is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Checks if every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Indices of the empty cells, ascending.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Returns a copy of this board with `mark` placed at `index`.
    ///
    /// The receiver is never mutated, so callers can probe candidate
    /// moves (bot search, blocking checks) against the same board.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfBounds`] if `index` is not 0-8, or
    /// [`MoveError::CellOccupied`] if the target cell already holds a mark.
    pub fn with_move(&self, index: usize, mark: Mark) -> Result<Board, MoveError> {
        if index >= 9 {
            return Err(MoveError::OutOfBounds(index));
        }
        if self.cells[index] != Cell::Empty {
            return Err(MoveError::CellOccupied(index));
        }
        let mut next = self.clone();
        next.cells[index] = Cell::Occupied(mark);
        Ok(next)
    }

    /// Formats the board as a human-readable grid.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                let symbol = match self.cells[index] {
                    Cell::Empty => (index + 1).to_string(),
                    Cell::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal status of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Play can continue.
    Undecided,
    /// Three in a row for the given mark.
    Won(Mark),
    /// Full board, no line.
    Draw,
}

impl Outcome {
    /// Whether the board has reached a terminal state.
    pub fn is_decided(self) -> bool {
        self != Outcome::Undecided
    }
}
