//! Move ordering by a victim/attacker heuristic.

use std::cmp::Reverse;

use tock_core::Move;

use crate::eval::material::piece_value;

/// Ordering score for `mv`: `victim - attacker / 10` for captures, 0 otherwise.
///
/// Cheap victims taken by expensive attackers can score negative and then
/// sort behind quiet moves.
pub fn score_move(mv: &Move) -> i32 {
    match mv.capture() {
        Some(victim) => piece_value(victim) - piece_value(mv.role()) / 10,
        None => 0,
    }
}

/// Sort `moves` by descending [`score_move`].
///
/// The sort is stable, so equally scored moves (all quiet moves in
/// particular) keep the rules engine's order.
pub fn order_moves(moves: &mut [Move]) {
    moves.sort_by_key(|mv| Reverse(score_move(mv)));
}
