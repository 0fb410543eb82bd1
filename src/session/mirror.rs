//! Local mirror of a server-authoritative session.
//!
//! The mirror keeps two board slots: the confirmed slot holds the last
//! authoritative broadcast, the speculative slot an optimistic local move
//! awaiting confirmation. Rendered state is speculative when present;
//! every authoritative broadcast clears the speculative slot and
//! overwrites the confirmed one, so stale local moves are never merged.
//!
//! Transitions are pure: requests the relay should receive in reaction
//! to a transition are returned as data, never sent from here.

use tracing::{debug, info, instrument, warn};

use super::super::games::tictactoe::{rules, Mark, MoveError, Outcome};
use super::protocol::{
    board_from_wire, ClientRequest, GameWinner, PlayerInfo, ServerEvent, StateSnapshot, WireBoard,
};
use super::room::RoomCode;

/// State of the link to the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// The link is up; moves may be submitted.
    Connected,
    /// The link is down; input is disabled until a reconnect.
    Disconnected,
    /// A reconnect attempt is in flight.
    Reconnecting,
}

/// Error raised by session operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum SessionError {
    /// The room code did not resolve to a waiting room.
    #[display("Room code did not resolve to a waiting room")]
    InvalidRoom,

    /// The link to the relay is down.
    #[display("Connection to the relay was lost")]
    ConnectionLost,

    /// The match has not started.
    #[display("The match has not started yet")]
    NotStarted,

    /// The other player has the turn.
    #[display("It is not your turn")]
    NotYourTurn,

    /// A winner has already been recorded.
    #[display("The match is already over")]
    MatchOver,

    /// The cell-level move failed local validation.
    #[display("{_0}")]
    #[from]
    Move(MoveError),

    /// The relay refused or failed a request.
    #[display("Relay request failed: {_0}")]
    Transport(String),
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Move(e) => Some(e),
            _ => None,
        }
    }
}

/// Client-side view of one multiplayer room.
#[derive(Debug, Clone)]
pub struct SessionMirror {
    room_code: RoomCode,
    local_name: String,
    my_symbol: Option<Mark>,
    players: Vec<PlayerInfo>,
    confirmed: WireBoard,
    speculative: Option<WireBoard>,
    current_turn: Mark,
    winner: Option<GameWinner>,
    started: bool,
    partner_away: bool,
    connection: ConnectionState,
}

impl SessionMirror {
    /// Creates the mirror for a room being joined; the local mark is
    /// unknown until the relay announces it.
    pub fn new(room_code: RoomCode, local_name: impl Into<String>) -> Self {
        Self {
            room_code,
            local_name: local_name.into(),
            my_symbol: None,
            players: Vec::new(),
            confirmed: [None; 9],
            speculative: None,
            current_turn: Mark::X,
            winner: None,
            started: false,
            partner_away: false,
            connection: ConnectionState::Connected,
        }
    }

    /// Creates the mirror for a freshly created room; the creator holds
    /// X and moves first once an opponent arrives.
    pub fn for_created_room(room_code: RoomCode, local_name: impl Into<String>) -> Self {
        let mut mirror = Self::new(room_code, local_name);
        mirror.my_symbol = Some(Mark::X);
        mirror
    }

    /// The room this mirror tracks.
    pub fn room_code(&self) -> &RoomCode {
        &self.room_code
    }

    /// The local player's mark, once assigned.
    pub fn my_symbol(&self) -> Option<Mark> {
        self.my_symbol
    }

    /// Players as last reported by the relay.
    pub fn players(&self) -> &[PlayerInfo] {
        &self.players
    }

    /// The mark whose turn it is, per the rendered state.
    pub fn current_turn(&self) -> Mark {
        self.current_turn
    }

    /// The recorded winner, advisory until `gameEnded` confirms it.
    pub fn winner(&self) -> Option<GameWinner> {
        self.winner
    }

    /// Whether the match has started.
    pub fn started(&self) -> bool {
        self.started
    }

    /// Whether the partner is currently away; submissions are advisory
    /// until they return.
    pub fn partner_away(&self) -> bool {
        self.partner_away
    }

    /// The link state.
    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    /// The board to render: speculative when an optimistic move is
    /// pending, the confirmed board otherwise.
    pub fn view_board(&self) -> &WireBoard {
        self.speculative.as_ref().unwrap_or(&self.confirmed)
    }

    /// The last authoritative board.
    pub fn confirmed_board(&self) -> &WireBoard {
        &self.confirmed
    }

    /// Whether the local player holds the turn.
    pub fn is_my_turn(&self) -> bool {
        self.my_symbol == Some(self.current_turn)
    }

    /// Terminal status of the rendered board, computed locally.
    ///
    /// Advisory only: used for a faster UI reaction and always superseded
    /// by the authoritative `gameEnded` broadcast.
    pub fn advisory_outcome(&self) -> Outcome {
        rules::evaluate(&board_from_wire(self.view_board()))
    }

    /// Applies an optimistic local move and yields the requests the relay
    /// should receive: the move itself, plus a game-over notice when the
    /// speculative board is terminal.
    ///
    /// # Errors
    ///
    /// Rejects moves while the link is down, before the match starts,
    /// after a winner is recorded, out of turn, or into an occupied or
    /// out-of-range cell. No state changes on error.
    #[instrument(skip(self), fields(room = %self.room_code))]
    pub fn submit_move(&mut self, cell_index: usize) -> Result<Vec<ClientRequest>, SessionError> {
        if self.connection != ConnectionState::Connected {
            return Err(SessionError::ConnectionLost);
        }
        if !self.started {
            return Err(SessionError::NotStarted);
        }
        if self.winner.is_some() {
            return Err(SessionError::MatchOver);
        }
        let Some(symbol) = self.my_symbol else {
            return Err(SessionError::NotStarted);
        };
        if self.current_turn != symbol {
            return Err(SessionError::NotYourTurn);
        }
        if cell_index >= 9 {
            return Err(MoveError::OutOfBounds(cell_index).into());
        }
        let mut next = *self.view_board();
        if next[cell_index].is_some() {
            return Err(MoveError::CellOccupied(cell_index).into());
        }
        next[cell_index] = Some(symbol);

        if self.partner_away {
            debug!(cell_index, "Partner away; move is advisory until they return");
        }
        self.speculative = Some(next);
        self.current_turn = symbol.opponent();

        let mut requests = vec![ClientRequest::MakeMove {
            room_code: self.room_code.clone(),
            cell_index,
            symbol,
        }];
        requests.extend(self.advisory_game_over(&next));
        Ok(requests)
    }

    /// Applies an authoritative broadcast and yields any requests the
    /// relay should receive in reaction (heartbeat echo, advisory
    /// game-over notice).
    ///
    /// Broadcasts may arrive at any time relative to local requests and
    /// always override optimistic state.
    #[instrument(skip(self, event), fields(room = %self.room_code))]
    pub fn apply_event(&mut self, event: ServerEvent) -> Vec<ClientRequest> {
        match event {
            ServerEvent::StartGame {
                players,
                your_symbol,
                current_turn,
                ..
            } => {
                self.my_symbol = your_symbol
                    .or_else(|| self.symbol_for(&players, &self.local_name))
                    .or(self.my_symbol);
                self.players = players;
                if let Some(turn) = current_turn {
                    self.current_turn = turn;
                }
                self.started = true;
                info!(symbol = ?self.my_symbol, "Match started");
                Vec::new()
            }
            ServerEvent::InvalidRoom => {
                warn!("Room code rejected by the relay");
                self.started = false;
                Vec::new()
            }
            ServerEvent::PartnerLeft => {
                info!("Partner left the room");
                self.partner_away = true;
                Vec::new()
            }
            ServerEvent::MoveMade {
                current_turn,
                board,
                ..
            } => {
                self.confirmed = board;
                self.speculative = None;
                self.current_turn = current_turn;
                self.advisory_game_over(&board).into_iter().collect()
            }
            ServerEvent::GameEnded { winner } => {
                info!(?winner, "Authoritative game end");
                self.winner = Some(winner);
                Vec::new()
            }
            ServerEvent::PartnerDisconnected => {
                info!("Partner disconnected; moves are advisory until they return");
                self.partner_away = true;
                Vec::new()
            }
            ServerEvent::PartnerReconnected => {
                info!("Partner reconnected");
                self.partner_away = false;
                Vec::new()
            }
            ServerEvent::GameReset {
                board,
                current_turn,
            } => {
                info!("Authoritative reset");
                self.confirmed = board;
                self.speculative = None;
                self.current_turn = current_turn;
                self.winner = None;
                Vec::new()
            }
            ServerEvent::Heartbeat => vec![ClientRequest::Heartbeat],
        }
    }

    /// Replaces the mirror with an authoritative snapshot.
    ///
    /// Nothing local survives: board, turn pointer and player list all
    /// come from the snapshot, and any speculative move is discarded.
    #[instrument(skip(self, snapshot), fields(room = %self.room_code))]
    pub fn resync(&mut self, snapshot: &StateSnapshot) {
        self.confirmed = snapshot.board;
        self.speculative = None;
        self.current_turn = snapshot.current_turn;
        if self.my_symbol.is_none() {
            self.my_symbol = self.symbol_for(&snapshot.players, &self.local_name);
        }
        self.players = snapshot.players.clone();
        if self.my_symbol.is_some() {
            self.started = true;
        }
        self.connection = ConnectionState::Connected;
        info!("Mirror resynchronized from snapshot");
    }

    /// Records a lost link. Room code and symbol are retained so a later
    /// reconnect can request a snapshot instead of replaying history.
    pub fn connection_lost(&mut self) {
        if self.connection != ConnectionState::Disconnected {
            warn!(room = %self.room_code, "Connection lost; input disabled");
        }
        self.connection = ConnectionState::Disconnected;
    }

    /// Records a reconnect attempt in flight.
    pub fn reconnecting(&mut self) {
        self.connection = ConnectionState::Reconnecting;
    }

    /// Records a terminal state found on the given board and returns the
    /// game-over notice for the relay, once per detected result.
    fn advisory_game_over(&mut self, board: &WireBoard) -> Option<ClientRequest> {
        let outcome = rules::evaluate(&board_from_wire(board));
        let winner = GameWinner::from_outcome(outcome)?;
        if self.winner.is_some() {
            return None;
        }
        debug!(?winner, "Advisory terminal state detected");
        self.winner = Some(winner);
        Some(ClientRequest::GameOver {
            room_code: self.room_code.clone(),
            winner,
        })
    }

    fn symbol_for(&self, players: &[PlayerInfo], name: &str) -> Option<Mark> {
        players.iter().find(|p| p.name == name).map(|p| p.symbol)
    }
}
