//! Board models shared by the offline controllers and the room client.

pub mod tictactoe;
pub mod ultimate;
