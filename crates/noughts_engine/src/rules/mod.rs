//! Game rules for tic-tac-toe.
//!
//! Pure functions over a board snapshot. Nothing here mutates or stores
//! state; the outcome of a board is always recomputed from its squares.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{WIN_LINES, winner};

use crate::{Board, Mark};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Terminal classification of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No winner yet and at least one empty square.
    None,
    /// The mark completed a line.
    Win(Mark),
    /// Full board, no line.
    Tie,
}

impl Outcome {
    /// True for `Win` and `Tie`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::None)
    }
}

/// Classifies a board. Total over every representable board.
#[instrument(level = "trace")]
pub fn evaluate(board: &Board) -> Outcome {
    if let Some(mark) = winner(board) {
        Outcome::Win(mark)
    } else if is_full(board) {
        Outcome::Tie
    } else {
        Outcome::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_is_open() {
        assert_eq!(evaluate(&Board::new()), Outcome::None);
        assert!(!Outcome::None.is_terminal());
    }

    #[test]
    fn test_full_board_without_line_is_tie() {
        let board: Board = "XOX OXX OXO".parse().expect("valid board");
        assert_eq!(evaluate(&board), Outcome::Tie);
    }

    #[test]
    fn test_win_on_full_board_beats_tie() {
        let board: Board = "XXX OOX OXO".parse().expect("valid board");
        assert_eq!(evaluate(&board), Outcome::Win(Mark::X));
    }
}
