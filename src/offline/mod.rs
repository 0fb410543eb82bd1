//! Offline match controllers for human-vs-bot play.
//!
//! Each controller walks one match through
//! awaiting-difficulty -> in-progress -> over, absorbing illegal moves
//! at the point of detection and emitting progress events over a channel
//! so a front end can observe without polling. The bot reply is scheduled
//! behind a short non-blocking delay; the delay shapes presentation only,
//! never decision correctness.

mod classic;
mod ultimate;

pub use classic::ClassicMatch;
pub use ultimate::UltimateMatch;

use super::games::tictactoe::Mark;

/// How a finished match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// The human player completed a line.
    HumanWin,
    /// The bot completed a line.
    BotWin,
    /// Neither side completed a line.
    Draw,
}

/// Where a match stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// Waiting for a difficulty to be selected.
    AwaitingDifficulty,
    /// Moves are being exchanged.
    InProgress,
    /// The match has ended.
    Over(MatchResult),
}

/// Progress events emitted by a controller.
#[derive(Debug, Clone)]
pub enum MatchEvent {
    /// A mark was placed.
    MoveMade {
        /// Who moved.
        mark: Mark,
        /// Sub-board index for the Ultimate variant, `None` for classic.
        sub_board: Option<usize>,
        /// Cell index within the board.
        cell: usize,
    },
    /// The bot reply has been scheduled.
    BotThinking,
    /// The match reached a terminal state.
    MatchOver {
        /// The final result.
        result: MatchResult,
    },
}
