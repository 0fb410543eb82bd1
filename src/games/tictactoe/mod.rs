pub mod rules;
mod types;

pub use types::{Board, Cell, Mark, MoveError, Outcome};
