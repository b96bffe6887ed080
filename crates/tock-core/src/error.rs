//! Errors raised while building or advancing a [`Game`](crate::Game).

use shakmaty::fen::ParseFenError;
use shakmaty::{Chess, PositionError};

/// Errors from FEN parsing, position validation and move input.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The FEN text could not be parsed.
    #[error("invalid FEN \"{fen}\": {source}")]
    InvalidFen {
        /// The FEN string that failed to parse.
        fen: String,
        /// The underlying parse error.
        #[source]
        source: ParseFenError,
    },

    /// The FEN parsed but describes a position that is not legal chess.
    #[error("illegal position: {source}")]
    IllegalPosition {
        /// The validation error reported by the rules engine.
        #[source]
        source: Box<PositionError<Chess>>,
    },

    /// A UCI move string is not one of the legal moves of the position.
    #[error("illegal move: {uci_move}")]
    IllegalMove {
        /// The rejected UCI move string.
        uci_move: String,
    },
}
