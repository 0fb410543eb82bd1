mod meta;
mod target;

pub use meta::{MetaBoard, UltimateMoveError};
pub use target::Target;
