//! Material balance.
//!
//! Scores are returned from White's perspective (positive = White ahead).

use tock_core::{Board, Color, Role};

/// All piece kinds in evaluation order.
pub const ROLES: [Role; 6] = [
    Role::Pawn,
    Role::Knight,
    Role::Bishop,
    Role::Rook,
    Role::Queen,
    Role::King,
];

/// Material weight of a piece kind in centipawns.
///
/// | Piece  | value |
/// |--------|-------|
/// | Pawn   | 100   |
/// | Knight | 300   |
/// | Bishop | 350   |
/// | Rook   | 500   |
/// | Queen  | 900   |
/// | King   | 0     |
#[inline]
pub const fn piece_value(role: Role) -> i32 {
    match role {
        Role::Pawn => 100,
        Role::Knight => 300,
        Role::Bishop => 350,
        Role::Rook => 500,
        Role::Queen => 900,
        Role::King => 0,
    }
}

/// Sum of `(white_count - black_count) * piece_value` over every piece kind.
pub fn material(board: &Board) -> i32 {
    ROLES
        .into_iter()
        .map(|role| {
            let pieces = board.by_role(role);
            let white = (pieces & board.by_color(Color::White)).count() as i32;
            let black = (pieces & board.by_color(Color::Black)).count() as i32;
            (white - black) * piece_value(role)
        })
        .sum()
}
