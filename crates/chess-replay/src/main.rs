//! chess-replay - Replays a movetext and prints the resulting position.
//!
//! Reads moves such as `1.e4 e5 2.Nf3` from the command line or a file,
//! plays them from the initial position (or a FEN / TOML setup), and prints
//! the board, its FEN, the movetext and the game status. An illegal move
//! ends the replay with a non-zero exit code.

use anyhow::Context;
use chess_rules::{Board, Movetext, Player, Setup};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Replay algebraic chess movetext.
#[derive(Parser)]
#[command(name = "chess-replay")]
#[command(about = "Replays algebraic movetext and reports the resulting position")]
struct Args {
    /// Movetext to replay, e.g. "1.e4 e5 2.Nf3"
    #[arg(conflicts_with = "file")]
    movetext: Option<String>,

    /// Read the movetext from a file
    #[arg(long)]
    file: Option<PathBuf>,

    /// Start from a FEN position instead of the initial position
    #[arg(long, conflicts_with = "setup")]
    fen: Option<String>,

    /// Start from a TOML setup file
    #[arg(long)]
    setup: Option<PathBuf>,

    /// Also print the legal moves of the side to move
    #[arg(long)]
    moves: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let board = match (&args.fen, &args.setup) {
        (Some(fen), _) => Board::from_fen(fen).context("invalid FEN")?,
        (None, Some(path)) => {
            let setup = Setup::load(path)
                .with_context(|| format!("failed to load setup {}", path.display()))?;
            Board::from_setup(&setup).context("invalid setup")?
        }
        (None, None) => Board::new(),
    };

    let text = match (&args.movetext, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read movetext {}", path.display()))?,
        (None, None) => String::new(),
    };

    let movetext = Movetext::parse(&text);
    tracing::info!("Replaying {} plies", movetext.len());
    let board = Player::new(movetext, board).play()?;

    print!("{}", board.to_ascii());
    println!();
    println!("FEN:      {}", board.to_fen());
    println!("Movetext: {}", board.movetext());
    println!("Status:   {}", board.status());
    if args.moves {
        println!("Moves:    {}", board.legal_moves().join(" "));
    }

    Ok(())
}
