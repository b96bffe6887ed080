//! Negamax alpha-beta search with a captures-only extension at the horizon.

use tock_core::{Game, Move};

use crate::config::SearchConfig;
use crate::eval::evaluate;
use crate::search::control::SearchControl;
use crate::search::ordering::order_moves;

/// Score bound wider than any reachable score.
pub const INF: i32 = 99_999_999;

/// Score of the side to move when checkmated, before the depth offset.
pub const MATE_SCORE: i32 = -9_999_999;

/// Scores at least this far from zero mean a forced mate was found.
pub const MATE_THRESHOLD: i32 = 9_000_000;

/// A move recommendation and its score from the side to move's perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Best move found at this node, if any move raised alpha.
    pub best_move: Option<Move>,
    /// Fail-hard score: clamped to the search window except for
    /// checkmate and draw scores.
    pub score: i32,
}

impl SearchOutcome {
    fn score(score: i32) -> Self {
        Self {
            best_move: None,
            score,
        }
    }
}

/// Search state threaded through negamax calls.
pub(crate) struct SearchContext<'a> {
    /// Total nodes visited.
    pub nodes: u64,
    /// Search control (stop flag + time budget).
    pub control: &'a SearchControl,
    /// Score of a drawn position.
    pub draw_score: i32,
    /// Depth (as a negative ply count) at which captures stop being expanded.
    pub quiescence_floor: i32,
}

impl<'a> SearchContext<'a> {
    pub fn new(control: &'a SearchControl, config: &SearchConfig) -> Self {
        Self {
            nodes: 0,
            control,
            draw_score: config.draw_score,
            quiescence_floor: -i32::from(config.quiescence_depth),
        }
    }
}

/// Negamax alpha-beta search of `depth` remaining plies.
///
/// At `depth <= 0` the node stands pat on the static evaluation and only
/// tries captures, down to the quiescence floor. The control is polled
/// after every child; on stop the best move among the children finished
/// so far is returned. Every move is applied through a
/// [`MoveGuard`](tock_core::MoveGuard), so `game` is back at this node's
/// position on every return path.
///
/// `ply` counts half-moves from the root. The root (ply 0) is always
/// searched even when it repeats an earlier position, so callers must
/// hand it a position that still has legal moves.
pub(crate) fn negamax(
    game: &mut Game,
    depth: i32,
    ply: u8,
    mut alpha: i32,
    beta: i32,
    ctx: &mut SearchContext<'_>,
) -> SearchOutcome {
    ctx.nodes += 1;

    // Shallower mates score higher once negated up the tree
    if game.is_checkmate() {
        return SearchOutcome::score(MATE_SCORE - depth);
    }
    if ply > 0 && game.is_draw() {
        return SearchOutcome::score(ctx.draw_score);
    }

    let mut moves = if depth > 0 {
        game.legal_moves()
    } else {
        let stand_pat = evaluate(game);
        if stand_pat >= beta {
            return SearchOutcome::score(beta);
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }
        if depth <= ctx.quiescence_floor {
            return SearchOutcome::score(alpha);
        }
        game.capture_moves()
    };
    order_moves(&mut moves);

    let mut best_move = None;
    for mv in &moves {
        let score = {
            let mut child = game.make_move(mv);
            -negamax(&mut child, depth - 1, ply.saturating_add(1), -beta, -alpha, ctx).score
        };

        if ctx.control.should_stop() {
            break;
        }

        if score >= beta {
            return SearchOutcome {
                best_move: Some(mv.clone()),
                score: beta,
            };
        }
        if score > alpha {
            best_move = Some(mv.clone());
            alpha = score;
        }
    }

    SearchOutcome {
        best_move,
        score: alpha,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;

    use super::*;

    const SCHOLARS_MATE_FEN: &str =
        "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";

    fn infinite() -> SearchControl {
        SearchControl::new_infinite(Arc::new(AtomicBool::new(false)))
    }

    fn config(quiescence_depth: u8) -> SearchConfig {
        SearchConfig {
            quiescence_depth,
            ..SearchConfig::default()
        }
    }

    fn search(game: &mut Game, depth: i32, config: &SearchConfig) -> SearchOutcome {
        search_at_ply(game, depth, 0, config)
    }

    fn search_at_ply(game: &mut Game, depth: i32, ply: u8, config: &SearchConfig) -> SearchOutcome {
        let control = infinite();
        let mut ctx = SearchContext::new(&control, config);
        negamax(game, depth, ply, -INF, INF, &mut ctx)
    }

    /// Full-width minimax over the same tree: same terminal scores, same
    /// stand-pat rule and quiescence floor, no window and no cutoffs.
    fn minimax(game: &mut Game, depth: i32, ply: u8, config: &SearchConfig) -> (Option<Move>, i32) {
        if game.is_checkmate() {
            return (None, MATE_SCORE - depth);
        }
        if ply > 0 && game.is_draw() {
            return (None, config.draw_score);
        }

        let (mut best, mut moves) = if depth > 0 {
            (-INF, game.legal_moves())
        } else {
            let stand_pat = evaluate(game);
            if depth <= -i32::from(config.quiescence_depth) {
                return (None, stand_pat);
            }
            (stand_pat, game.capture_moves())
        };
        order_moves(&mut moves);

        let mut best_move = None;
        for mv in &moves {
            let score = {
                let mut child = game.make_move(mv);
                -minimax(&mut child, depth - 1, ply + 1, config).1
            };
            if score > best {
                best = score;
                best_move = Some(mv.clone());
            }
        }
        (best_move, best)
    }

    #[test]
    fn pruned_search_matches_minimax() {
        let positions = [
            ("4k3/8/3p4/2p2r2/3P4/2N5/8/4K2R w K - 0 1", 3),
            ("4k3/8/3p4/2p2r2/3P4/2N5/8/4K2R b K - 0 1", 3),
            ("r3k3/1p3p2/8/3n4/4P3/2B5/5PP1/4K2R w - - 0 1", 2),
            (SCHOLARS_MATE_FEN, 2),
        ];
        let config = config(3);
        for (fen, depth) in positions {
            let mut game = Game::from_fen(fen).unwrap();
            let pruned = search(&mut game, depth, &config);
            let (reference_move, reference_score) = minimax(&mut game, depth, 0, &config);
            assert_eq!(pruned.score, reference_score, "score mismatch for {fen}");
            assert_eq!(pruned.best_move, reference_move, "move mismatch for {fen}");
        }
    }

    #[test]
    fn finds_mate_in_one_at_depth_1() {
        let mut game = Game::from_fen(SCHOLARS_MATE_FEN).unwrap();
        let outcome = search(&mut game, 1, &SearchConfig::default());
        let best = outcome.best_move.expect("mating move");
        assert_eq!(game.uci(&best), "h5f7");
        assert_eq!(outcome.score, -MATE_SCORE);
    }

    #[test]
    fn shallower_mate_scores_higher() {
        let mut game = Game::from_fen(SCHOLARS_MATE_FEN).unwrap();
        let at_1 = search(&mut game, 1, &SearchConfig::default());
        let at_3 = search(&mut game, 3, &SearchConfig::default());
        // Mate found with two plies left below it scores 2 more than at the horizon.
        assert_eq!(at_3.score, at_1.score + 2);
        assert!(at_3.score > MATE_THRESHOLD);
    }

    #[test]
    fn checkmated_side_scores_mate() {
        let mut game = Game::from_fen("7k/6Q1/5K2/8/8/8/8/8 b - - 0 1").unwrap();
        let outcome = search(&mut game, 2, &SearchConfig::default());
        assert_eq!(outcome.best_move, None);
        assert_eq!(outcome.score, MATE_SCORE - 2);
    }

    #[test]
    fn stalemate_scores_draw() {
        let mut game = Game::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
        let outcome = search_at_ply(&mut game, 3, 1, &SearchConfig::default());
        assert_eq!(outcome.best_move, None);
        assert_eq!(outcome.score, -50);
    }

    #[test]
    fn repetition_below_root_scores_configured_draw() {
        let mut game = Game::starting_position();
        for mv in ["g1f3", "g8f6", "f3g1", "f6g8"] {
            game.play_uci(mv).unwrap();
        }
        let config = SearchConfig {
            draw_score: 0,
            ..SearchConfig::default()
        };
        assert_eq!(search_at_ply(&mut game, 2, 1, &config).score, 0);
    }

    #[test]
    fn repeated_root_is_still_searched() {
        // Back-rank mate in one, reached again after a knight shuffle.
        let mut game = Game::from_fen("6k1/5ppp/8/8/8/n7/8/3RK1N1 w - - 0 1").unwrap();
        for mv in ["g1f3", "a3b5", "f3g1", "b5a3"] {
            game.play_uci(mv).unwrap();
        }
        assert!(game.is_draw());

        let config = SearchConfig::default();
        let outcome = search(&mut game, 2, &config);
        assert_eq!(game.uci(outcome.best_move.as_ref().expect("mating move")), "d1d8");
        assert!(outcome.score > MATE_THRESHOLD);

        let (reference_move, reference_score) = minimax(&mut game, 2, 0, &config);
        assert_eq!(outcome.score, reference_score);
        assert_eq!(outcome.best_move, reference_move);
    }

    #[test]
    fn stand_pat_fails_high() {
        // White is a queen up at the horizon; a low beta is cut immediately.
        let mut game = Game::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        let control = infinite();
        let config = SearchConfig::default();
        let mut ctx = SearchContext::new(&control, &config);
        let outcome = negamax(&mut game, 0, 0, -INF, 100, &mut ctx);
        assert_eq!(outcome.score, 100);
        assert_eq!(ctx.nodes, 1);
    }

    #[test]
    fn quiescence_resolves_hanging_piece() {
        // Black to move can take the undefended rook on d5.
        let mut game = Game::from_fen("3qk3/8/8/3R4/8/8/8/4K3 b - - 0 1").unwrap();
        let static_eval = evaluate(&game);
        let outcome = search(&mut game, 0, &SearchConfig::default());
        assert!(outcome.score > static_eval + 400);
        assert_eq!(game.uci(&outcome.best_move.unwrap()), "d8d5");
    }

    #[test]
    fn quiescence_floor_zero_is_static() {
        let mut game = Game::from_fen("3qk3/8/8/3R4/8/8/8/4K3 b - - 0 1").unwrap();
        let static_eval = evaluate(&game);
        let outcome = search(&mut game, 0, &config(0));
        assert_eq!(outcome.score, static_eval);
        assert_eq!(outcome.best_move, None);
    }

    #[test]
    fn stopped_search_keeps_position_intact() {
        let mut game = Game::starting_position();
        let before = game.board().clone();
        let control = SearchControl::new_infinite(Arc::new(AtomicBool::new(true)));
        let config = SearchConfig::default();
        let mut ctx = SearchContext::new(&control, &config);
        let outcome = negamax(&mut game, 4, 0, -INF, INF, &mut ctx);
        // The first child finished, but its score is discarded on stop.
        assert_eq!(outcome.best_move, None);
        assert_eq!(outcome.score, -INF);
        assert_eq!(game.board(), &before);
        assert_eq!(game.history_len(), 0);
    }

    #[test]
    fn search_restores_position() {
        let mut game = Game::from_fen(SCHOLARS_MATE_FEN).unwrap();
        let before = game.board().clone();
        search(&mut game, 3, &SearchConfig::default());
        assert_eq!(game.board(), &before);
        assert_eq!(game.history_len(), 0);
    }
}
