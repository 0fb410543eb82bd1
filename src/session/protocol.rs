//! Wire contracts at the relay boundary.
//!
//! The relay speaks JSON with camelCase payload fields. Requests are
//! client-initiated and may carry an ack; broadcasts are unsolicited
//! pushes that can arrive at any time relative to local requests.

use serde::{Deserialize, Serialize};

use super::super::games::tictactoe::{Board, Cell, Mark, Outcome};
use super::room::RoomCode;

/// A board as the relay transmits it: nine optional marks.
pub type WireBoard = [Option<Mark>; 9];

/// Builds a board model value from a wire board, for local redundant
/// validation of authoritative snapshots.
pub fn board_from_wire(wire: &WireBoard) -> Board {
    let mut cells = [Cell::Empty; 9];
    for (index, mark) in wire.iter().enumerate() {
        if let Some(mark) = mark {
            cells[index] = Cell::Occupied(*mark);
        }
    }
    Board::from_cells(cells)
}

/// A player as described by the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    /// Network identity assigned by the relay.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Assigned mark.
    pub symbol: Mark,
}

/// Winner field of the game-over exchanges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameWinner {
    /// X completed a line.
    #[serde(rename = "X")]
    X,
    /// O completed a line.
    #[serde(rename = "O")]
    O,
    /// The board filled with no line.
    #[serde(rename = "draw")]
    Draw,
}

impl From<Mark> for GameWinner {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::X => GameWinner::X,
            Mark::O => GameWinner::O,
        }
    }
}

impl GameWinner {
    /// Maps a decided board outcome onto the wire winner field.
    pub fn from_outcome(outcome: Outcome) -> Option<Self> {
        match outcome {
            Outcome::Undecided => None,
            Outcome::Won(mark) => Some(mark.into()),
            Outcome::Draw => Some(GameWinner::Draw),
        }
    }
}

/// Client-initiated requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientRequest {
    /// Opens a new room under a client-generated code.
    #[serde(rename_all = "camelCase")]
    CreateRoom {
        /// Code for the new room.
        room_code: RoomCode,
        /// Display name of the creator.
        name: String,
    },
    /// Joins a waiting room.
    #[serde(rename_all = "camelCase")]
    JoinRoom {
        /// Code of the room to join.
        room_code: RoomCode,
        /// Display name of the joiner.
        name: String,
    },
    /// Requests a full state snapshot.
    #[serde(rename_all = "camelCase")]
    GetGameState {
        /// Room to describe.
        room_code: RoomCode,
    },
    /// Submits a move.
    #[serde(rename_all = "camelCase")]
    MakeMove {
        /// Room the move belongs to.
        room_code: RoomCode,
        /// Target cell index.
        cell_index: usize,
        /// The mover's mark.
        symbol: Mark,
    },
    /// Reports a locally detected terminal state.
    #[serde(rename_all = "camelCase")]
    GameOver {
        /// Room the result belongs to.
        room_code: RoomCode,
        /// The detected result.
        winner: GameWinner,
    },
    /// Asks the authority for a fresh board.
    #[serde(rename_all = "camelCase")]
    ResetGame {
        /// Room to reset.
        room_code: RoomCode,
    },
    /// Re-enters a room after a connection loss.
    #[serde(rename_all = "camelCase")]
    ReconnectToRoom {
        /// Previously known room code.
        room_code: RoomCode,
    },
    /// Liveness echo, sent in response to the relay's heartbeat.
    Heartbeat,
}

/// Acknowledgement of a create or join request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ack {
    /// Error text when the request was refused.
    #[serde(default)]
    pub error: Option<String>,
}

/// Full authoritative state of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    /// The authoritative board.
    pub board: WireBoard,
    /// The mark whose turn it is.
    pub current_turn: Mark,
    /// Both players, as far as the relay knows them.
    pub players: Vec<PlayerInfo>,
}

/// Reply to a reconnect request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconnectReply {
    /// Whether the room was still alive.
    pub success: bool,
    /// Snapshot to resynchronize from, when successful.
    #[serde(default)]
    pub room_state: Option<StateSnapshot>,
}

/// Unsolicited broadcasts from the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Both players are present; the match begins.
    #[serde(rename_all = "camelCase")]
    StartGame {
        /// Room the match runs in.
        room_code: RoomCode,
        /// Both players.
        players: Vec<PlayerInfo>,
        /// The local player's mark, when the relay addresses it directly.
        #[serde(default)]
        your_symbol: Option<Mark>,
        /// The mark that moves first, when announced.
        #[serde(default)]
        current_turn: Option<Mark>,
    },
    /// The joined code did not resolve to a waiting room.
    InvalidRoom,
    /// The partner left the room for good.
    PartnerLeft,
    /// A move was accepted by the authority.
    #[serde(rename_all = "camelCase")]
    MoveMade {
        /// Cell the mark landed on.
        cell_index: usize,
        /// The mark placed.
        symbol: Mark,
        /// Whose turn it is now.
        current_turn: Mark,
        /// The authoritative board after the move.
        board: WireBoard,
    },
    /// The authority declared the match over.
    GameEnded {
        /// The final result.
        winner: GameWinner,
    },
    /// The partner's connection dropped; they may come back.
    PartnerDisconnected,
    /// The partner's connection is back.
    PartnerReconnected,
    /// The authority reset the match.
    #[serde(rename_all = "camelCase")]
    GameReset {
        /// The fresh board.
        board: WireBoard,
        /// The mark that moves first.
        current_turn: Mark,
    },
    /// Liveness probe; must be echoed back.
    Heartbeat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_move_wire_shape() {
        let request = ClientRequest::MakeMove {
            room_code: RoomCode::new("ab12cd"),
            cell_index: 4,
            symbol: Mark::X,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["event"], "makeMove");
        assert_eq!(json["data"]["roomCode"], "AB12CD");
        assert_eq!(json["data"]["cellIndex"], 4);
        assert_eq!(json["data"]["symbol"], "X");
    }

    #[test]
    fn test_move_made_round_trip() {
        let mut board: WireBoard = [None; 9];
        board[4] = Some(Mark::X);
        let event = ServerEvent::MoveMade {
            cell_index: 4,
            symbol: Mark::X,
            current_turn: Mark::O,
            board,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"moveMade\""));
        assert!(json.contains("\"currentTurn\""));
        let back: ServerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_draw_winner_wire_name() {
        let json = serde_json::to_string(&GameWinner::Draw).unwrap();
        assert_eq!(json, "\"draw\"");
    }

    #[test]
    fn test_board_from_wire() {
        let mut wire: WireBoard = [None; 9];
        wire[0] = Some(Mark::O);
        wire[8] = Some(Mark::X);
        let board = board_from_wire(&wire);
        assert_eq!(board.get(0), Some(Cell::Occupied(Mark::O)));
        assert_eq!(board.get(4), Some(Cell::Empty));
        assert_eq!(board.get(8), Some(Cell::Occupied(Mark::X)));
    }
}
