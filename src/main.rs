use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tock_core::{Game, STARTING_FEN};
use tock_engine::{SearchConfig, think};

/// Pick one move for a chess position under a per-move time budget.
#[derive(Debug, Parser)]
#[command(name = "tock", version)]
struct Args {
    /// Position to search, in FEN.
    #[arg(long, default_value = STARTING_FEN)]
    fen: String,

    /// Moves in UCI notation played from the FEN before searching.
    #[arg(long, num_args = 1..)]
    moves: Vec<String>,

    /// Time budget in milliseconds [default: 100].
    #[arg(long)]
    movetime: Option<u64>,

    /// Deepest iteration to start [default: 64].
    #[arg(long)]
    max_depth: Option<u8>,

    /// Capture plies searched past the horizon [default: 8].
    #[arg(long)]
    qsearch_depth: Option<u8>,

    /// Score of a drawn position for the side to move [default: -50].
    #[arg(long, allow_hyphen_values = true)]
    draw_score: Option<i32>,
}

impl Args {
    fn config(&self) -> SearchConfig {
        let defaults = SearchConfig::default();
        SearchConfig {
            move_time: self.movetime.map_or(defaults.move_time, Duration::from_millis),
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
            quiescence_depth: self.qsearch_depth.unwrap_or(defaults.quiescence_depth),
            draw_score: self.draw_score.unwrap_or(defaults.draw_score),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.config();
    config.validate().context("invalid search settings")?;

    let mut game = Game::from_fen(&args.fen).context("could not load position")?;
    for mv in &args.moves {
        game.play_uci(mv)
            .with_context(|| format!("could not play move {mv}"))?;
    }

    info!(fen = %args.fen, moves = args.moves.len(), ?config, "tock thinking");

    match think(&mut game, &config) {
        Some(mv) => println!("bestmove {}", game.uci(&mv)),
        None => println!("bestmove 0000"),
    }
    Ok(())
}
