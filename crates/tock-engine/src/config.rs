//! Search settings.

use std::time::Duration;

use crate::search::negamax::MATE_THRESHOLD;

/// Knobs for one move decision. [`Default`] gives the reference tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Wall-clock budget for the whole decision.
    pub move_time: Duration,
    /// Deepest iteration the driver will start.
    pub max_depth: u8,
    /// Capture plies allowed below the horizon before standing pat.
    pub quiescence_depth: u8,
    /// Score of a drawn position for the side to move.
    pub draw_score: i32,
}

impl SearchConfig {
    /// Reject settings the search cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if self.draw_score.abs() >= MATE_THRESHOLD {
            return Err(ConfigError::DrawScoreInMateBand {
                score: self.draw_score,
                limit: MATE_THRESHOLD,
            });
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            move_time: Duration::from_millis(100),
            max_depth: 64,
            quiescence_depth: 8,
            draw_score: -50,
        }
    }
}

/// Invalid [`SearchConfig`] values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `max_depth` is zero, so not even one iteration could run.
    #[error("max depth must be at least 1")]
    ZeroDepth,

    /// The draw score could be mistaken for a mate score.
    #[error("draw score {score} overlaps the mate band (|score| must stay below {limit})")]
    DrawScoreInMateBand {
        /// The configured draw score.
        score: i32,
        /// Smallest magnitude treated as a mate score.
        limit: i32,
    },
}
