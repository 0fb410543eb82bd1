//! Client side of the multiplayer session: wire contracts, the
//! reconciliation mirror, and the async room client.

mod client;
mod mirror;
mod protocol;
mod room;

pub use client::{RelayTransport, RoomClient, TransportError};
pub use mirror::{ConnectionState, SessionError, SessionMirror};
pub use protocol::{
    board_from_wire, Ack, ClientRequest, GameWinner, PlayerInfo, ReconnectReply, ServerEvent,
    StateSnapshot, WireBoard,
};
pub use room::RoomCode;
