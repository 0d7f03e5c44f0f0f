//! Game session: one human against the minimax adversary, round after round.

use crate::preference::{PreferenceStore, Seats};
use crate::rules::{Outcome, evaluate};
use crate::search::best_move;
use crate::timer::{TimerKind, TimerSlot, TimerToken};
use crate::{Board, Mark, Position, Square};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Where the session is in the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
pub enum Phase {
    /// Waiting for the human to pick an empty square.
    AwaitingHumanMove,
    /// The adversary's move is scheduled.
    AwaitingAdversaryMove,
    /// The round ended; the board clears when the reset timer fires.
    RoundResolved,
}

/// Rounds won by each mark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    x: u32,
    o: u32,
}

impl Scoreboard {
    /// Rounds won by X.
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Rounds won by O.
    pub fn o(&self) -> u32 {
        self.o
    }

    /// Rounds won by `mark`.
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    fn record_win(&mut self, mark: Mark) {
        match mark {
            Mark::X => self.x += 1,
            Mark::O => self.o += 1,
        }
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Delays before the session's scheduled actions run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delays {
    adversary: Duration,
    round_reset: Duration,
}

impl Delays {
    /// Creates a delay pair.
    pub fn new(adversary: Duration, round_reset: Duration) -> Self {
        Self {
            adversary,
            round_reset,
        }
    }

    /// Pause before the adversary places its mark.
    pub fn adversary(&self) -> Duration {
        self.adversary
    }

    /// Pause before a finished round is cleared.
    pub fn round_reset(&self) -> Duration {
        self.round_reset
    }
}

impl Default for Delays {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), Duration::from_millis(1000))
    }
}

/// Everything a presentation layer needs to draw the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    board: Board,
    turn: Mark,
    scores: Scoreboard,
    outcome: Outcome,
    phase: Phase,
    seats: Seats,
}

impl Snapshot {
    /// Board squares.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark expected to move next.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Cumulative score.
    pub fn scores(&self) -> Scoreboard {
        self.scores
    }

    /// Outcome of the board as shown.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Who plays which mark.
    pub fn seats(&self) -> Seats {
        self.seats
    }

    /// Result line for the board, empty while the round is open.
    pub fn status_line(&self) -> String {
        match self.outcome {
            Outcome::None => String::new(),
            Outcome::Win(mark) => format!("Player {} wins!", mark),
            Outcome::Tie => "It's a tie!".to_string(),
        }
    }

    /// Score as "human - adversary".
    pub fn scoreline(&self) -> String {
        format!(
            "{} - {}",
            self.scores.wins(self.seats.human()),
            self.scores.wins(self.seats.adversary())
        )
    }

    /// Whether a click on `pos` would currently be accepted.
    pub fn accepts_click(&self, pos: Position) -> bool {
        self.phase == Phase::AwaitingHumanMove && self.board.is_empty(pos)
    }
}

/// A single game session.
///
/// All mutation goes through [`Session::cell_clicked`], [`Session::reset`],
/// [`Session::restart`] and [`Session::fire`]. After each board change the
/// session re-evaluates the board and either schedules the adversary, ends
/// the round, or waits for the human.
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    turn: Mark,
    scores: Scoreboard,
    seats: Seats,
    phase: Phase,
    timers: TimerSlot,
    delays: Delays,
}

impl Session {
    /// Mark that opens every round.
    pub const STARTING_MARK: Mark = Mark::X;

    /// Creates a session with fixed seats.
    ///
    /// When the adversary holds the starting mark its first move is
    /// scheduled immediately.
    #[instrument(fields(human = %seats.human()))]
    pub fn new(seats: Seats, delays: Delays) -> Self {
        info!("Creating new game session");
        let mut session = Self {
            board: Board::new(),
            turn: Self::STARTING_MARK,
            scores: Scoreboard::default(),
            seats,
            phase: Phase::AwaitingHumanMove,
            timers: TimerSlot::new(),
            delays,
        };
        session.settle();
        session
    }

    /// Creates a session, reading the human's mark once from `store`.
    #[instrument(skip(store))]
    pub fn from_preferences(store: &dyn PreferenceStore, delays: Delays) -> Self {
        Self::new(Seats::from_store(store), delays)
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark expected to move next.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Cumulative score.
    pub fn scores(&self) -> Scoreboard {
        self.scores
    }

    /// Seat assignment.
    pub fn seats(&self) -> Seats {
        self.seats
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Outcome of the current board.
    pub fn outcome(&self) -> Outcome {
        evaluate(&self.board)
    }

    /// The timer the driver should wait on, if any.
    pub fn pending_timer(&self) -> Option<TimerToken> {
        self.timers.pending()
    }

    /// Captures the render state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            turn: self.turn,
            scores: self.scores,
            outcome: self.outcome(),
            phase: self.phase,
            seats: self.seats,
        }
    }

    /// Places the human's mark at `index` (0-8).
    ///
    /// Ignored unless the human is to move and the square is empty; returns
    /// whether the move was accepted.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn cell_clicked(&mut self, index: usize) -> bool {
        let Some(pos) = Position::from_index(index) else {
            warn!(index, "Click outside the board ignored");
            return false;
        };

        if self.phase != Phase::AwaitingHumanMove || self.turn != self.seats.human() {
            debug!(position = %pos, "Click while not the human's turn ignored");
            return false;
        }

        if !self.board.is_empty(pos) {
            debug!(position = %pos, "Click on occupied square ignored");
            return false;
        }

        self.place(pos, self.seats.human());
        true
    }

    /// Clears the board and turn at once, keeping the score.
    ///
    /// Any pending timer is superseded.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!("Round reset");
        self.clear_round();
    }

    /// Resets the round and zeroes both score counters.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        info!("Session restarted");
        self.scores.clear();
        self.clear_round();
    }

    /// Runs the action of a timer the driver waited out.
    ///
    /// Returns `false`, changing nothing, when `token` is no longer the
    /// pending timer.
    #[instrument(skip(self), fields(timer_id = token.id(), kind = %token.kind()))]
    pub fn fire(&mut self, token: TimerToken) -> bool {
        if !self.timers.claim(token) {
            debug!("Stale timer ignored");
            return false;
        }

        match token.kind() {
            TimerKind::AdversaryMove => self.adversary_move(),
            TimerKind::RoundReset => {
                info!("Starting next round");
                self.clear_round();
            }
        }
        true
    }

    fn adversary_move(&mut self) {
        let mark = self.seats.adversary();
        let best = best_move(&mut self.board, mark);
        match best.position() {
            Some(pos) => {
                debug!(position = %pos, score = best.score(), "Adversary moves");
                self.place(pos, mark);
            }
            None => {
                // Settle never schedules a move on a finished board, and the
                // round was already scored when it finished.
                warn!("Adversary found no move");
                self.resolve_round();
            }
        }
    }

    fn place(&mut self, pos: Position, mark: Mark) {
        self.board.set(pos, Square::Occupied(mark));
        self.turn = mark.opponent();
        debug!(position = %pos, %mark, "Mark placed");
        self.settle();
    }

    fn clear_round(&mut self) {
        self.board.clear();
        self.turn = Self::STARTING_MARK;
        self.settle();
    }

    /// Re-evaluates the board after a mutation and picks the next phase.
    fn settle(&mut self) {
        match evaluate(&self.board) {
            Outcome::Win(mark) => {
                self.scores.record_win(mark);
                info!(winner = %mark, x = self.scores.x, o = self.scores.o, "Round won");
                self.resolve_round();
            }
            Outcome::Tie => {
                info!("Round tied");
                self.resolve_round();
            }
            Outcome::None if self.turn == self.seats.adversary() => {
                self.phase = Phase::AwaitingAdversaryMove;
                self.timers
                    .schedule(TimerKind::AdversaryMove, self.delays.adversary());
            }
            Outcome::None => {
                self.phase = Phase::AwaitingHumanMove;
                self.timers.cancel();
            }
        }
    }

    fn resolve_round(&mut self) {
        self.phase = Phase::RoundResolved;
        self.timers
            .schedule(TimerKind::RoundReset, self.delays.round_reset());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_as(human: Mark) -> Session {
        Session::new(Seats::new(human), Delays::default())
    }

    fn fire_pending(session: &mut Session) -> TimerToken {
        let token = session.pending_timer().expect("timer pending");
        assert!(session.fire(token));
        token
    }

    #[test]
    fn test_human_move_schedules_adversary() {
        let mut session = session_as(Mark::X);
        assert_eq!(session.phase(), Phase::AwaitingHumanMove);
        assert_eq!(session.pending_timer(), None);

        assert!(session.cell_clicked(4));
        assert_eq!(session.turn(), Mark::O);
        assert_eq!(session.phase(), Phase::AwaitingAdversaryMove);

        let token = session.pending_timer().expect("adversary scheduled");
        assert_eq!(token.kind(), TimerKind::AdversaryMove);
        assert_eq!(token.delay(), Delays::default().adversary());
    }

    #[test]
    fn test_adversary_move_returns_turn_to_human() {
        let mut session = session_as(Mark::X);
        session.cell_clicked(4);
        fire_pending(&mut session);

        assert_eq!(session.board().occupied_count(), 2);
        assert_eq!(session.turn(), Mark::X);
        assert_eq!(session.phase(), Phase::AwaitingHumanMove);
        assert_eq!(session.pending_timer(), None);
    }

    #[test]
    fn test_clicks_ignored_out_of_turn() {
        let mut session = session_as(Mark::X);
        assert!(session.cell_clicked(0));
        let before = session.snapshot();
        assert!(!session.cell_clicked(1));
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_clicks_ignored_on_occupied_or_outside() {
        let mut session = session_as(Mark::X);
        session.cell_clicked(0);
        fire_pending(&mut session);
        let before = session.snapshot();
        assert!(!session.cell_clicked(0));
        assert!(!session.cell_clicked(9));
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_adversary_as_x_opens_round() {
        let mut session = session_as(Mark::O);
        assert_eq!(session.phase(), Phase::AwaitingAdversaryMove);
        assert!(!session.cell_clicked(4));
        fire_pending(&mut session);
        assert_eq!(session.board().occupied_count(), 1);
        assert_eq!(session.turn(), Mark::O);
        assert_eq!(session.phase(), Phase::AwaitingHumanMove);
    }

    #[test]
    fn test_stale_timer_is_noop() {
        let mut session = session_as(Mark::X);
        session.cell_clicked(4);
        let stale = session.pending_timer().expect("adversary scheduled");
        session.reset();
        assert!(!session.fire(stale));
        assert_eq!(session.board(), &Board::new());
        assert_eq!(session.phase(), Phase::AwaitingHumanMove);
    }

    #[test]
    fn test_human_win_scores_once_for_human_only() {
        let mut session = session_as(Mark::X);
        session.board = "XX. OO. ...".parse().expect("valid board");

        assert!(session.cell_clicked(2));
        assert_eq!(session.outcome(), Outcome::Win(Mark::X));
        assert_eq!(session.phase(), Phase::RoundResolved);
        assert_eq!(session.scores().x(), 1);
        assert_eq!(session.scores().o(), 0);
        assert_eq!(session.snapshot().status_line(), "Player X wins!");
        assert_eq!(session.snapshot().scoreline(), "1 - 0");

        // No adversary move on a won board, only the round reset.
        let token = session.pending_timer().expect("round reset scheduled");
        assert_eq!(token.kind(), TimerKind::RoundReset);

        session.restart();
        assert_eq!(session.scores(), Scoreboard::default());
    }

    #[test]
    fn test_tie_leaves_score_unchanged() {
        let mut session = session_as(Mark::X);
        // X fills the last square without completing a line.
        session.board = "XOX OXX O.O".parse().expect("valid board");

        assert!(session.cell_clicked(7));
        assert_eq!(session.outcome(), Outcome::Tie);
        assert_eq!(session.phase(), Phase::RoundResolved);
        assert_eq!(session.scores(), Scoreboard::default());
        assert_eq!(session.snapshot().status_line(), "It's a tie!");
    }

    #[test]
    fn test_snapshot_status_and_scoreline() {
        let mut session = session_as(Mark::O);
        session.scores.record_win(Mark::X);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.status_line(), "");
        // Human plays O, so their count comes first.
        assert_eq!(snapshot.scoreline(), "0 - 1");
    }

    #[test]
    fn test_snapshot_accepts_clicks_on_open_squares_only() {
        let mut session = session_as(Mark::X);
        assert!(session.snapshot().accepts_click(Position::Center));

        session.cell_clicked(4);
        let waiting = session.snapshot();
        assert!(!waiting.accepts_click(Position::TopLeft));

        fire_pending(&mut session);
        let snapshot = session.snapshot();
        assert!(!snapshot.accepts_click(Position::Center));
        assert_eq!(
            Position::ALL
                .iter()
                .filter(|pos| snapshot.accepts_click(**pos))
                .count(),
            7
        );
    }
}
