//! Tic-tac-toe engines with bot opponents and a room-based multiplayer
//! session client.
//!
//! # Architecture
//!
//! - **Games**: board models for the classic 3x3 game and the Ultimate
//!   nested variant, with pure move application and a single
//!   authoritative terminal check
//! - **Bot**: difficulty-tiered move selection (random, win/block
//!   probing, exhaustive minimax)
//! - **Offline**: local match controllers driving human-vs-bot play
//! - **Session**: client-side mirror of a server-authoritative
//!   multiplayer room, with optimistic moves reconciled against
//!   authoritative broadcasts
//!
//! # Example
//!
//! ```
//! use tictac_rooms::{select_move, Board, Difficulty, Mark};
//!
//! let board = Board::new().with_move(4, Mark::X)?;
//! let reply = select_move(&board, Difficulty::Hard, Mark::O, Mark::X)?;
//! assert!(board.is_empty(reply));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod bot;
mod config;
mod games;
mod logging;
mod offline;
mod session;

// Crate-level exports - Bot engine
pub use bot::{select_move, BotError, Difficulty};

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Board models
pub use games::tictactoe::{rules, Board, Cell, Mark, MoveError, Outcome};
pub use games::ultimate::{MetaBoard, Target, UltimateMoveError};

// Crate-level exports - Logging
pub use logging::init_tracing;

// Crate-level exports - Offline controllers
pub use offline::{ClassicMatch, MatchEvent, MatchPhase, MatchResult, UltimateMatch};

// Crate-level exports - Multiplayer session
pub use session::{
    board_from_wire, Ack, ClientRequest, ConnectionState, GameWinner, PlayerInfo, ReconnectReply,
    RelayTransport, RoomClient, RoomCode, ServerEvent, SessionError, SessionMirror, StateSnapshot,
    TransportError, WireBoard,
};
