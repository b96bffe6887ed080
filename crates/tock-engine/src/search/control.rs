//! Search control: stop flag and per-move time budget.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Decides when a search has to stop.
///
/// Polled before each iterative-deepening iteration and after every child
/// move at every node. A subtree that has already started is always
/// finished, so the overrun past the budget is bounded by one branch.
pub struct SearchControl {
    stopped: Arc<AtomicBool>,
    start: Instant,
    budget: Option<Duration>,
}

impl SearchControl {
    /// Control with a wall-clock budget; the clock starts now.
    pub fn new_timed(stopped: Arc<AtomicBool>, budget: Duration) -> Self {
        Self {
            stopped,
            start: Instant::now(),
            budget: Some(budget),
        }
    }

    /// Control without a budget; only the stop flag ends the search.
    pub fn new_infinite(stopped: Arc<AtomicBool>) -> Self {
        Self {
            stopped,
            start: Instant::now(),
            budget: None,
        }
    }

    /// Whether the search should stop now.
    ///
    /// True once the stop flag is set or the elapsed time exceeds the
    /// budget. An expired budget latches the flag, so later polls skip
    /// the clock.
    pub fn should_stop(&self) -> bool {
        if self.stopped.load(Ordering::Relaxed) {
            return true;
        }

        if let Some(budget) = self.budget
            && self.start.elapsed() > budget
        {
            self.stopped.store(true, Ordering::Release);
            return true;
        }

        false
    }

    /// Elapsed time since the control was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl std::fmt::Debug for SearchControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchControl")
            .field("stopped", &self.stopped.load(Ordering::Relaxed))
            .field("elapsed", &self.elapsed())
            .field("budget", &self.budget)
            .finish()
    }
}
