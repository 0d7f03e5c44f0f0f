//! Minimax adversary search.
//!
//! Scores are always from O's side: a won board is worth [`WIN_SCORE`] to O
//! and `-WIN_SCORE` to X. The mover flips each ply, and so does the
//! selection rule (O maximizes, X minimizes), which makes the search play
//! perfectly for either mark.

use crate::rules::{Outcome, evaluate};
use crate::{Board, Mark, Position, Square};
use derive_new::new;
use serde::Serialize;
use tracing::{debug, instrument};

/// Score of a board won by O. A board won by X scores the negation.
pub const WIN_SCORE: i32 = 10;

/// Result of a search: the chosen move and the score it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, new)]
pub struct BestMove {
    position: Option<Position>,
    score: i32,
}

impl BestMove {
    /// Chosen position; `None` when the board was already terminal.
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Score under optimal play from both sides.
    pub fn score(&self) -> i32 {
        self.score
    }
}

/// A mark placed for the duration of one trial move.
///
/// Dropping the guard empties the square again, so the board is restored on
/// every exit path out of the recursion.
struct TrialMove<'a> {
    board: &'a mut Board,
    position: Position,
}

impl<'a> TrialMove<'a> {
    fn place(board: &'a mut Board, position: Position, mark: Mark) -> Self {
        board.set(position, Square::Occupied(mark));
        Self { board, position }
    }

    fn board(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for TrialMove<'_> {
    fn drop(&mut self) {
        self.board.set(self.position, Square::Empty);
    }
}

/// Finds the best move for `to_move`.
///
/// Explores the game tree by placing and removing marks on `board` itself;
/// when this returns the board is exactly as it was passed in. Callers check
/// for a terminal board first: on one, the result carries only its score.
#[instrument(skip(board), fields(empty = 9 - board.occupied_count()))]
pub fn best_move(board: &mut Board, to_move: Mark) -> BestMove {
    let best = search(board, to_move);
    debug!(position = ?best.position, score = best.score, "Search complete");
    best
}

fn search(board: &mut Board, to_move: Mark) -> BestMove {
    match evaluate(board) {
        Outcome::Win(Mark::O) => return BestMove::new(None, WIN_SCORE),
        Outcome::Win(Mark::X) => return BestMove::new(None, -WIN_SCORE),
        Outcome::Tie => return BestMove::new(None, 0),
        Outcome::None => {}
    }

    let mut best = BestMove::new(
        None,
        match to_move {
            Mark::O => i32::MIN,
            Mark::X => i32::MAX,
        },
    );

    for position in board.empty_positions() {
        let score = {
            let mut trial = TrialMove::place(board, position, to_move);
            search(trial.board(), to_move.opponent()).score
        };

        let improves = match to_move {
            Mark::O => score > best.score,
            Mark::X => score < best.score,
        };
        if improves {
            best = BestMove::new(Some(position), score);
        }
    }

    best
}
