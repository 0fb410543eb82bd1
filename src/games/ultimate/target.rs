//! The active sub-board constraint.

use serde::{Deserialize, Serialize};

/// Where the next move may be played.
///
/// Derived from the cell index of the previous move: the matching
/// sub-board becomes the forced target while it is still undecided,
/// otherwise the constraint relaxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    /// Any undecided sub-board is playable.
    Unrestricted,
    /// Only the sub-board at this index is playable.
    Board(usize),
}

impl Target {
    /// Whether a move into the given sub-board satisfies the constraint.
    pub fn permits(self, board_index: usize) -> bool {
        match self {
            Target::Unrestricted => true,
            Target::Board(forced) => forced == board_index,
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Unrestricted => write!(f, "any board"),
            Target::Board(index) => write!(f, "board {}", index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrestricted_permits_all() {
        for index in 0..9 {
            assert!(Target::Unrestricted.permits(index));
        }
    }

    #[test]
    fn test_forced_board_permits_only_itself() {
        let target = Target::Board(4);
        assert!(target.permits(4));
        assert!(!target.permits(3));
    }
}
