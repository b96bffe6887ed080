//! Move selection for tock: static evaluation, move ordering and a
//! time-boxed iterative-deepening negamax search.

pub mod config;
pub mod eval;
pub mod search;

pub use config::{ConfigError, SearchConfig};
pub use eval::evaluate;
pub use search::control::SearchControl;
pub use search::{SearchResult, Searcher, think};
