//! Rules-engine adapter: wraps `shakmaty` positions with the undo and
//! repetition history the search needs.

mod error;
mod game;

pub use error::GameError;
pub use game::{Game, MoveGuard, STARTING_FEN};
pub use shakmaty::{Board, Color, Move, MoveList, Role, Square};
