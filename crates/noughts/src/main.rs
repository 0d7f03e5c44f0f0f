//! Noughts - unified CLI.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use noughts::{AppConfig, FilePreferences, FrameFormat, drive, read_inputs};
use noughts_engine::{Board, Mark, Seats, Session, best_move};
use std::path::PathBuf;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Frames own stdout; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,noughts=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            preferences,
            mark,
            json,
        } => run_play(config, preferences, mark, json).await,
        Command::BestMove {
            board,
            to_move,
            json,
        } => run_best_move(&board, to_move, json),
    }
}

/// Play interactively until quit or end of input
#[instrument(skip_all, fields(config_path = %config_path.display()))]
async fn run_play(
    config_path: PathBuf,
    preferences: Option<PathBuf>,
    mark: Option<Mark>,
    json: bool,
) -> Result<()> {
    let config = AppConfig::load(&config_path)?;

    let seats = match mark {
        Some(mark) => {
            info!(%mark, "Mark chosen on the command line");
            Seats::new(mark)
        }
        None => {
            let path = preferences.or_else(|| config.preferences().clone());
            let store = FilePreferences::load_or_empty(path.as_deref())?;
            Seats::from_store(&store)
        }
    };

    let session = Session::new(seats, config.delays());
    let format = if json { FrameFormat::Json } else { FrameFormat::Text };

    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let (frame_tx, mut frame_rx) = mpsc::unbounded_channel();

    let reader = tokio::spawn(async move {
        if let Err(e) = read_inputs(BufReader::new(tokio::io::stdin()), input_tx).await {
            error!(error = %e, "Failed reading input");
        }
    });

    let renderer = tokio::spawn(async move {
        while let Some(frame) = frame_rx.recv().await {
            match format.render(&frame) {
                Ok(text) => println!("{}\n", text),
                Err(e) => error!(error = %e, "Failed to render frame"),
            }
        }
    });

    let session = drive(session, input_rx, frame_tx).await;
    renderer.await?;
    // Stdin may still be blocked on a read; nothing left to feed.
    reader.abort();

    let scores = session.scores();
    info!(x = scores.x(), o = scores.o(), "Final score");
    Ok(())
}

/// Print the search's choice for a board
#[instrument]
fn run_best_move(board: &str, to_move: Mark, json: bool) -> Result<()> {
    let mut board: Board = board.parse()?;
    let best = best_move(&mut board, to_move);

    if json {
        println!("{}", serde_json::to_string(&best)?);
    } else {
        match best.position() {
            Some(pos) => println!(
                "{} plays {} ({}), score {}",
                to_move,
                pos.to_index(),
                pos.label(),
                best.score()
            ),
            None => println!("Board is finished, score {}", best.score()),
        }
    }
    Ok(())
}
