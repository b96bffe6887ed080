//! Iterative-deepening driver and the one-call decision entry point.

pub mod control;
pub mod negamax;
pub mod ordering;

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use tracing::{debug, info, warn};

use tock_core::{Game, Move};

use crate::config::SearchConfig;
use crate::eval::evaluate;
use control::SearchControl;
use negamax::{INF, MATE_SCORE, SearchContext, SearchOutcome, negamax};
use ordering::order_moves;

/// Result of a finished decision.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Move to play. `None` only when the root has no legal moves.
    pub best_move: Option<Move>,
    /// Score of the iteration that produced `best_move`, from the side to
    /// move's perspective.
    pub score: i32,
    /// Depth of the iteration that produced `best_move`; 0 when the
    /// fallback move was returned.
    pub depth: u8,
    /// Total nodes visited across all iterations.
    pub nodes: u64,
}

/// Iterative-deepening searcher.
///
/// Holds no state between calls besides its configuration; every call to
/// [`Searcher::search`] builds and discards its own tree.
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    config: SearchConfig,
}

impl Searcher {
    /// Create a searcher with the given settings.
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Run iterative deepening until `control` says stop or `max_depth`
    /// has been searched.
    ///
    /// The answer lags one iteration behind: an iteration's move is only
    /// adopted once the next poll of `control` passes, so a result the
    /// clock may have cut short is never played. Before the first
    /// iteration the answer is seeded with the first legal move in search
    /// order.
    ///
    /// Calls `on_iter(depth, score, nodes, best_move)` after each
    /// iteration returns. `game` is left at the root position.
    pub fn search<F>(&self, game: &mut Game, control: &SearchControl, mut on_iter: F) -> SearchResult
    where
        F: FnMut(u8, i32, u64, Option<&Move>),
    {
        let mut root_moves = game.legal_moves();
        order_moves(&mut root_moves);

        let Some(fallback) = root_moves.first().cloned() else {
            let score = if game.is_checkmate() {
                MATE_SCORE
            } else {
                self.config.draw_score
            };
            return SearchResult {
                best_move: None,
                score,
                depth: 0,
                nodes: 0,
            };
        };

        let mut ctx = SearchContext::new(control, &self.config);

        let mut committed_move = fallback;
        let mut committed_score = evaluate(game);
        let mut committed_depth: u8 = 0;
        let mut pending: Option<SearchOutcome> = None;
        let mut depth: u8 = 0;

        loop {
            if control.should_stop() {
                break;
            }

            if let Some(outcome) = pending.take()
                && let Some(mv) = outcome.best_move
            {
                committed_move = mv;
                committed_score = outcome.score;
                committed_depth = depth;
            }

            if depth >= self.config.max_depth {
                break;
            }

            depth += 1;
            let outcome = negamax(game, i32::from(depth), 0, -INF, INF, &mut ctx);

            let best = outcome.best_move.as_ref().map(|mv| game.uci(mv));
            debug!(
                depth,
                score = outcome.score,
                nodes = ctx.nodes,
                best = best.as_deref(),
                "iteration finished"
            );
            on_iter(depth, outcome.score, ctx.nodes, outcome.best_move.as_ref());

            pending = Some(outcome);
        }

        if committed_depth == 0 {
            warn!(
                elapsed_ms = control.elapsed().as_millis() as u64,
                "no iteration adopted before stopping, playing fallback move"
            );
        }

        SearchResult {
            best_move: Some(committed_move),
            score: committed_score,
            depth: committed_depth,
            nodes: ctx.nodes,
        }
    }
}

/// Choose a move for the side to move within `config.move_time`.
///
/// Returns `None` only if the position has no legal moves.
pub fn think(game: &mut Game, config: &SearchConfig) -> Option<Move> {
    let control = SearchControl::new_timed(Arc::new(AtomicBool::new(false)), config.move_time);
    let result = Searcher::new(*config).search(game, &control, |_, _, _, _| {});

    let best = result.best_move.as_ref().map(|mv| game.uci(mv));
    info!(
        best = best.as_deref(),
        score = result.score,
        depth = result.depth,
        nodes = result.nodes,
        elapsed_ms = control.elapsed().as_millis() as u64,
        "decision made"
    );

    result.best_move
}
