//! Piece-square estimates.
//!
//! Instead of 64-entry tables, each piece kind gets a small formula over
//! the square's file, rank and distance from the board edge. Formulas are
//! written from White's side; Black pieces are scored on the vertically
//! mirrored square (see [`estimate_for`]).

use tock_core::{Color, Role, Square};

/// Distance of a file or rank index from the nearest board edge (0..=3).
#[inline]
fn edge_distance(x: i32) -> i32 {
    (7 - x).min(x)
}

/// Combined file and rank distance from the edges (0 in a corner, 6 in the centre).
#[inline]
fn centrality(sq: Square) -> i32 {
    edge_distance(sq.file() as i32) + edge_distance(sq.rank() as i32)
}

/// Pawns want to advance; on their home rank the centre pawns are
/// penalised so they get pushed first.
fn pawn(file: i32, rank: i32) -> i32 {
    if rank > 1 {
        (rank - 2) * 10
    } else if edge_distance(file) == 3 {
        -20
    } else {
        10
    }
}

/// Minor pieces and the queen share one centralisation formula.
fn centralised(sq: Square) -> i32 {
    centrality(sq) * 10 - 40
}

/// Rooks like the seventh rank and dislike edge files off the back rank.
fn rook(file: i32, rank: i32) -> i32 {
    if rank == 6 {
        10
    } else if file % 7 != 0 || rank == 0 {
        0
    } else {
        -5
    }
}

/// Blend between a sheltered king while the board is full and an active
/// king once `piece_count` falls.
fn king(sq: Square, piece_count: i32) -> i32 {
    let centre = centrality(sq);
    (6 - centre) * piece_count + centre * (32 - piece_count) / 3
}

/// Positional estimate for a White piece of kind `role` on `sq`.
///
/// `piece_count` is the number of pieces of both colors on the board and
/// only affects the king.
pub fn estimate(role: Role, sq: Square, piece_count: i32) -> i32 {
    let file = sq.file() as i32;
    let rank = sq.rank() as i32;
    match role {
        Role::Pawn => pawn(file, rank),
        Role::Knight | Role::Bishop | Role::Queen => centralised(sq),
        Role::Rook => rook(file, rank),
        Role::King => king(sq, piece_count),
    }
}

/// Positional estimate for a piece of either color, seen from its own side.
#[inline]
pub fn estimate_for(role: Role, color: Color, sq: Square, piece_count: i32) -> i32 {
    let sq = match color {
        Color::White => sq,
        Color::Black => sq.flip_vertical(),
    };
    estimate(role, sq, piece_count)
}
