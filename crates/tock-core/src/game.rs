//! Game state: the current position plus undo and repetition history.
//!
//! The search mutates one [`Game`] in place. Every applied move is
//! reverted in LIFO order, either through a [`MoveGuard`] or an explicit
//! [`Game::pop`].

use std::fmt;
use std::ops::{Deref, DerefMut};

use shakmaty::fen::Fen;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{Board, CastlingMode, Chess, Color, EnPassantMode, Move, MoveList, Position};
use tracing::debug;

use crate::error::GameError;

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmove clock value at which the fifty-move rule applies.
const FIFTY_MOVE_PLIES: u32 = 100;

/// A chess position with the history needed to take moves back and to
/// detect repetitions.
#[derive(Clone)]
pub struct Game {
    /// Current position.
    position: Chess,
    /// Positions before each applied move, most recent last.
    undo: Vec<Chess>,
    /// Zobrist hash of every position reached, the current one last.
    hashes: Vec<Zobrist64>,
}

impl Game {
    /// Start a game from an arbitrary position with empty history.
    pub fn new(position: Chess) -> Game {
        let hash = hash_of(&position);
        Game {
            position,
            undo: Vec::new(),
            hashes: vec![hash],
        }
    }

    /// Return a game at the standard starting position.
    pub fn starting_position() -> Game {
        Game::new(Chess::default())
    }

    /// Parse a FEN string into a game with empty history.
    pub fn from_fen(fen: &str) -> Result<Game, GameError> {
        let parsed: Fen = fen.trim().parse().map_err(|source| GameError::InvalidFen {
            fen: fen.to_string(),
            source,
        })?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|source| GameError::IllegalPosition {
                source: Box::new(source),
            })?;
        debug!(fen = %fen.trim(), "game loaded from FEN");
        Ok(Game::new(position))
    }

    /// Piece placement of the current position.
    #[inline]
    pub fn board(&self) -> &Board {
        self.position.board()
    }

    /// The side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    /// Total number of pieces of both colors on the board, kings included.
    #[inline]
    pub fn piece_count(&self) -> usize {
        self.position.board().occupied().count()
    }

    /// Number of moves currently applied on top of the initial position.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.undo.len()
    }

    /// All legal moves for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        self.position.legal_moves()
    }

    /// Legal captures only (en passant included).
    pub fn capture_moves(&self) -> MoveList {
        self.position.capture_moves()
    }

    /// Whether the side to move has been checkmated.
    pub fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    /// Whether the position is drawn: stalemate, insufficient material,
    /// the fifty-move rule, or a repetition.
    pub fn is_draw(&self) -> bool {
        self.position.halfmoves() >= FIFTY_MOVE_PLIES
            || self.is_repetition()
            || self.position.is_insufficient_material()
            || self.position.is_stalemate()
    }

    /// Whether the current position already occurred since the last
    /// irreversible move (capture or pawn move).
    pub fn is_repetition(&self) -> bool {
        let Some((current, earlier)) = self.hashes.split_last() else {
            return false;
        };
        let reversible = self.position.halfmoves() as usize;
        earlier
            .iter()
            .rev()
            .take(reversible)
            .any(|hash| hash == current)
    }

    /// Apply `mv` and return a guard that takes it back when dropped.
    ///
    /// `mv` must be legal in the current position.
    pub fn make_move(&mut self, mv: &Move) -> MoveGuard<'_> {
        self.push(mv);
        MoveGuard { game: self }
    }

    /// Apply `mv` without a guard. Must be paired with [`Game::pop`].
    pub fn push(&mut self, mv: &Move) {
        let previous = self.position.clone();
        self.position.play_unchecked(mv);
        self.undo.push(previous);
        self.hashes.push(hash_of(&self.position));
    }

    /// Take back the most recently applied move.
    pub fn pop(&mut self) {
        debug_assert!(!self.undo.is_empty(), "pop with empty undo history");
        if let Some(previous) = self.undo.pop() {
            self.position = previous;
            self.hashes.pop();
        }
    }

    /// Permanently play a move given in UCI notation (e.g. `e2e4`, `e7e8q`).
    pub fn play_uci(&mut self, uci_move: &str) -> Result<Move, GameError> {
        let wanted = uci_move.trim();
        let mv = self
            .legal_moves()
            .into_iter()
            .find(|mv| self.uci(mv) == wanted)
            .ok_or_else(|| GameError::IllegalMove {
                uci_move: wanted.to_string(),
            })?;
        self.push(&mv);
        Ok(mv)
    }

    /// UCI notation for `mv` (standard castling, king moves two squares).
    pub fn uci(&self, mv: &Move) -> String {
        mv.to_uci(CastlingMode::Standard).to_string()
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("board", self.board())
            .field("turn", &self.turn())
            .field("history_len", &self.history_len())
            .finish()
    }
}

fn hash_of(position: &Chess) -> Zobrist64 {
    position.zobrist_hash(EnPassantMode::Legal)
}

/// A move applied to a [`Game`] for the lifetime of the guard.
///
/// Dereferences to the game so the search can keep working on the child
/// position. Dropping the guard reverts the move, including on early
/// returns and unwinding.
#[must_use = "the move is taken back as soon as the guard is dropped"]
pub struct MoveGuard<'a> {
    game: &'a mut Game,
}

impl Deref for MoveGuard<'_> {
    type Target = Game;

    fn deref(&self) -> &Game {
        &*self.game
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Game {
        &mut *self.game
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        self.game.pop();
    }
}
