//! Controller for an offline classic 3x3 match.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::super::bot::{self, Difficulty};
use super::super::config::GameConfig;
use super::super::games::tictactoe::{rules, Board, Mark, Outcome};
use super::{MatchEvent, MatchPhase, MatchResult};

/// One offline match of the classic game against the bot.
///
/// The human always holds X and moves first; the bot holds O. Difficulty
/// is chosen per match and cleared again on reset.
#[derive(Debug)]
pub struct ClassicMatch {
    board: Board,
    phase: MatchPhase,
    difficulty: Option<Difficulty>,
    human: Mark,
    bot: Mark,
    bot_delay: Duration,
    winning_line: Option<([usize; 3], Mark)>,
    events: mpsc::UnboundedSender<MatchEvent>,
}

impl ClassicMatch {
    /// Creates a match awaiting difficulty selection.
    #[instrument(skip(events))]
    pub fn new(events: mpsc::UnboundedSender<MatchEvent>) -> Self {
        Self {
            board: Board::new(),
            phase: MatchPhase::AwaitingDifficulty,
            difficulty: None,
            human: Mark::X,
            bot: Mark::O,
            bot_delay: Duration::from_millis(300),
            winning_line: None,
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
    ///
    /// Ignored unless the match is awaiting selection.
    #[instrument(skip(self))]
    pub fn choose_difficulty(&mut self, difficulty: Difficulty) {
        if self.phase != MatchPhase::AwaitingDifficulty {
            debug!(%difficulty, "Ignoring difficulty selection: match already started");
            return;
        }
        info!(%difficulty, "Starting match");
        self.difficulty = Some(difficulty);
        self.phase = MatchPhase::InProgress;
    }

    /// Plays a human move, then the scheduled bot reply.
    ///
    /// Illegal moves are absorbed here with no state change. After the
    /// human move the terminal state is checked; if the match continues,
    /// the bot reply runs after the configured cosmetic delay and the
    /// terminal state is checked again.
    #[instrument(skip(self))]
    pub async fn play(&mut self, cell: usize) {
        if self.phase != MatchPhase::InProgress {
            debug!(cell, "Ignoring move: match not in progress");
            return;
        }
        let Some(difficulty) = self.difficulty else {
            warn!("Match in progress without a difficulty");
            return;
        };

        match self.board.with_move(cell, self.human) {
            Ok(board) => self.board = board,
            Err(e) => {
                debug!(error = %e, "Ignoring illegal move");
                return;
            }
        }
        self.emit(MatchEvent::MoveMade {
            mark: self.human,
            sub_board: None,
            cell,
        });
        if self.finish_if_over() {
            return;
        }

        self.emit(MatchEvent::BotThinking);
        tokio::time::sleep(self.bot_delay).await;

        let reply = match bot::select_move(&self.board, difficulty, self.bot, self.human) {
            Ok(index) => index,
            Err(e) => {
                warn!(error = %e, "Bot invoked without a legal move");
                return;
            }
        };
        match self.board.with_move(reply, self.bot) {
            Ok(board) => self.board = board,
            Err(e) => {
                warn!(error = %e, cell = reply, "Bot selected an illegal cell");
                return;
            }
        }
        self.emit(MatchEvent::MoveMade {
            mark: self.bot,
            sub_board: None,
            cell: reply,
        });
        self.finish_if_over();
    }

    /// Clears the board and returns to difficulty selection.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!("Resetting match");
        self.board = Board::new();
        self.phase = MatchPhase::AwaitingDifficulty;
        self.difficulty = None;
        self.winning_line = None;
    }

    /// The current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The current phase.
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// The difficulty in force, if one has been chosen.
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    /// The completed line once the match has been won.
    pub fn winning_line(&self) -> Option<([usize; 3], Mark)> {
        self.winning_line
    }

    /// Runs the authoritative terminal check and closes the match if it
    /// has been decided.
    fn finish_if_over(&mut self) -> bool {
        let result = match rules::evaluate(&self.board) {
            Outcome::Undecided => return false,
            Outcome::Won(mark) if mark == self.human => MatchResult::HumanWin,
            Outcome::Won(_) => MatchResult::BotWin,
            Outcome::Draw => MatchResult::Draw,
        };
        self.winning_line = rules::winning_line(&self.board);
        self.phase = MatchPhase::Over(result);
        info!(?result, "Match over");
        self.emit(MatchEvent::MatchOver { result });
        true
    }

    /// Best-effort event delivery; the receiver may already be gone when
    /// the front end has navigated away.
    fn emit(&self, event: MatchEvent) {
        let _ = self.events.send(event);
    }
}
