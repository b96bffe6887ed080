//! Static evaluation: material plus geometric piece-square estimates.

pub mod material;
pub mod pst;

use tock_core::{Board, Color, Game};

use material::{ROLES, material};
use pst::estimate_for;

/// Evaluate the position from the side to move's perspective.
///
/// Material and positional terms are summed from White's point of view and
/// negated when Black is to move, as negamax expects.
pub fn evaluate(game: &Game) -> i32 {
    let board = game.board();
    let piece_count = game.piece_count() as i32;
    let score = material(board) + positional(board, piece_count);

    match game.turn() {
        Color::White => score,
        Color::Black => -score,
    }
}

/// Piece-square estimates for White minus those for Black.
fn positional(board: &Board, piece_count: i32) -> i32 {
    let mut score = 0;
    for role in ROLES {
        let pieces = board.by_role(role);
        for sq in pieces & board.by_color(Color::White) {
            score += estimate_for(role, Color::White, sq, piece_count);
        }
        for sq in pieces & board.by_color(Color::Black) {
            score -= estimate_for(role, Color::Black, sq, piece_count);
        }
    }
    score
}
