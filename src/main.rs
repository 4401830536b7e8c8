//! Textrix: text-driven falling-block puzzle. Reads board size and commands, prints the board.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use textrix::glyphs::{DEFAULT_EMPTY, DEFAULT_FILLED};
use textrix::{App, GameConfig, Glyphs};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::registry()
        .with(EnvFilter::new(&args.log))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = GameConfig {
        glyphs: Glyphs::new(args.filled, args.empty)?,
    };
    let out = io::stdout().lock();
    match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening script {}", path.display()))?;
            App::new(BufReader::new(file), out, &config)?.run()
        }
        None => App::new(io::stdin().lock(), out, &config)?.run(),
    }
}

/// Text-driven falling-block puzzle.
#[derive(Debug, Parser)]
#[command(
    name = "textrix",
    version,
    about = "Text-driven falling-block puzzle. Feed it commands, it prints the board.",
    long_about = "Textrix reads the board width and height, then one command per turn: \
        piece <O|I|S|Z|L|J|T>, left, right, rotate, down, break (clear full rows) or exit.\n\n\
        After every turn the board is printed as rows of space-separated cells. \
        The game ends when a landed piece reaches the top row."
)]
pub struct Args {
    /// Read commands from FILE instead of stdin.
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Symbol for filled cells.
    #[arg(long, default_value_t = DEFAULT_FILLED, value_name = "CHAR")]
    pub filled: char,

    /// Symbol for empty cells.
    #[arg(long, default_value_t = DEFAULT_EMPTY, value_name = "CHAR")]
    pub empty: char,

    /// Tracing filter for stderr logs, e.g. "info", "textrix=debug".
    #[arg(long, default_value = "warn")]
    pub log: String,
}
