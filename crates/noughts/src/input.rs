//! Terminal commands fed to the session.

use derive_more::{Display, Error};
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

/// One command from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// The square at this index (0-8) was clicked.
    Click(usize),
    /// Clear the round, keep the score.
    Reset,
    /// Clear the round and the score.
    Restart,
    /// Leave the game; the session is discarded.
    Quit,
}

/// Unrecognised command text.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unknown command {:?} (try 1-9, r, restart, q)", _0)]
pub struct ParseInputError(#[error(not(source))] String);

impl FromStr for Input {
    type Err = ParseInputError;

    /// Squares are keyed 1-9 as drawn on the board.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let command = s.trim().to_ascii_lowercase();
        match command.as_str() {
            "r" | "reset" => Ok(Input::Reset),
            "restart" => Ok(Input::Restart),
            "q" | "quit" | "home" => Ok(Input::Quit),
            _ => match command.parse::<usize>() {
                Ok(key) if key >= 1 => Ok(Input::Click(key - 1)),
                _ => Err(ParseInputError(s.trim().to_string())),
            },
        }
    }
}

/// Forwards commands read line by line until end of input.
///
/// Blank lines are skipped and unknown commands are logged and dropped.
/// Returns when the reader is exhausted, the receiver is gone, or a
/// [`Input::Quit`] was forwarded.
#[instrument(skip_all)]
pub async fn read_inputs<R>(reader: R, inputs: mpsc::UnboundedSender<Input>) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Input>() {
            Ok(input) => {
                debug!(?input, "Command read");
                if inputs.send(input).is_err() || input == Input::Quit {
                    break;
                }
            }
            Err(e) => {
                warn!(error = %e, "Ignoring command");
            }
        }
    }
    Ok(())
}
