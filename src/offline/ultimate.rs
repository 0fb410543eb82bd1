//! Controller for an offline Ultimate match.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::super::bot::{self, Difficulty};
use super::super::config::GameConfig;
use super::super::games::tictactoe::{Mark, Outcome};
use super::super::games::ultimate::MetaBoard;
use super::{MatchEvent, MatchPhase, MatchResult};

/// One offline match of the Ultimate variant against the bot.
///
/// The controller owns the meta-board, which enforces the active
/// sub-board constraint and records sub-board outcomes as moves land.
/// The bot is consulted one sub-board at a time: the controller resolves
/// the constraint to a concrete board and hands only that board to the
/// engine.
#[derive(Debug)]
pub struct UltimateMatch {
    meta: MetaBoard,
    phase: MatchPhase,
    difficulty: Option<Difficulty>,
    human: Mark,
    bot: Mark,
    bot_delay: Duration,
    events: mpsc::UnboundedSender<MatchEvent>,
}

impl UltimateMatch {
    /// Creates a match awaiting difficulty selection.
    #[instrument(skip(events))]
    pub fn new(events: mpsc::UnboundedSender<MatchEvent>) -> Self {
        Self {
            meta: MetaBoard::new(),
            phase: MatchPhase::AwaitingDifficulty,
            difficulty: None,
            human: Mark::X,
            bot: Mark::O,
            bot_delay: Duration::from_millis(500),
            events,
        }
    }

    /// Creates a match with the bot-reply delay taken from config.
    #[instrument(skip(config, events))]
    pub fn from_config(config: &GameConfig, events: mpsc::UnboundedSender<MatchEvent>) -> Self {
        let mut game = Self::new(events);
        game.bot_delay = config.bot_delay();
        game
    }

    /// Selects the difficulty and starts the match.
    #[instrument(skip(self))]
    pub fn choose_difficulty(&mut self, difficulty: Difficulty) {
        if self.phase != MatchPhase::AwaitingDifficulty {
            debug!(%difficulty, "Ignoring difficulty selection: match already started");
            return;
        }
        info!(%difficulty, "Starting ultimate match");
        self.difficulty = Some(difficulty);
        self.phase = MatchPhase::InProgress;
    }

    /// Plays a human move into a sub-board, then the scheduled bot reply.
    ///
    /// Constraint violations and cell-level failures are absorbed here
    /// with no state change.
    #[instrument(skip(self))]
    pub async fn play(&mut self, board_index: usize, cell: usize) {
        if self.phase != MatchPhase::InProgress {
            debug!(board_index, cell, "Ignoring move: match not in progress");
            return;
        }
        let Some(difficulty) = self.difficulty else {
            warn!("Match in progress without a difficulty");
            return;
        };

        if let Err(e) = self.meta.apply_move(board_index, cell, self.human) {
            debug!(error = %e, "Ignoring illegal move");
            return;
        }
        self.emit(MatchEvent::MoveMade {
            mark: self.human,
            sub_board: Some(board_index),
            cell,
        });
        if self.finish_if_over() {
            return;
        }

        self.emit(MatchEvent::BotThinking);
        tokio::time::sleep(self.bot_delay).await;
        self.bot_turn(difficulty);
    }

    /// Resolves the constraint to a sub-board and plays the bot reply.
    fn bot_turn(&mut self, difficulty: Difficulty) {
        let Some(board_index) = self.meta.active_board() else {
            warn!("No open sub-board for the bot");
            return;
        };
        let Some(board) = self.meta.board(board_index) else {
            warn!(board_index, "Active sub-board index out of range");
            return;
        };
        let reply = match bot::select_move(board, difficulty, self.bot, self.human) {
            Ok(index) => index,
            Err(e) => {
                warn!(error = %e, board_index, "Bot invoked without a legal move");
                return;
            }
        };
        if let Err(e) = self.meta.apply_move(board_index, reply, self.bot) {
            warn!(error = %e, board_index, cell = reply, "Bot selected an illegal move");
            return;
        }
        self.emit(MatchEvent::MoveMade {
            mark: self.bot,
            sub_board: Some(board_index),
            cell: reply,
        });
        self.finish_if_over();
    }

    /// Clears the meta-board and returns to difficulty selection.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!("Resetting ultimate match");
        self.meta.reset();
        self.phase = MatchPhase::AwaitingDifficulty;
        self.difficulty = None;
    }

    /// The meta-board.
    pub fn meta(&self) -> &MetaBoard {
        &self.meta
    }

    /// The current phase.
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// The difficulty in force, if one has been chosen.
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    /// The line of won sub-boards once the meta-game has been won.
    pub fn winning_boards(&self) -> Option<([usize; 3], Mark)> {
        self.meta.meta_winning_line()
    }

    fn finish_if_over(&mut self) -> bool {
        let result = match self.meta.meta_outcome() {
            Outcome::Undecided => return false,
            Outcome::Won(mark) if mark == self.human => MatchResult::HumanWin,
            Outcome::Won(_) => MatchResult::BotWin,
            Outcome::Draw => MatchResult::Draw,
        };
        self.phase = MatchPhase::Over(result);
        info!(?result, "Ultimate match over");
        self.emit(MatchEvent::MatchOver { result });
        true
    }

    fn emit(&self, event: MatchEvent) {
        let _ = self.events.send(event);
    }
}
