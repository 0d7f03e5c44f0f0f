//! Tic-tac-toe engine with a perfect-play adversary.
//!
//! # Architecture
//!
//! - **Rules**: pure win/tie detection over a board snapshot
//! - **Search**: minimax that picks the adversary's move
//! - **Session**: board, turn, score and timers for one human against the search
//!
//! # Example
//!
//! ```
//! use noughts_engine::{Delays, Mark, Phase, Seats, Session};
//!
//! let mut session = Session::new(Seats::new(Mark::X), Delays::default());
//! assert!(session.cell_clicked(4));
//! assert_eq!(session.phase(), Phase::AwaitingAdversaryMove);
//!
//! // The driver waits out the delay, then hands the timer back.
//! let timer = session.pending_timer().expect("adversary scheduled");
//! assert!(session.fire(timer));
//! assert_eq!(session.board().occupied_count(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod position;
mod preference;
pub mod rules;
mod search;
mod session;
mod timer;
mod types;

pub use position::Position;
pub use preference::{
    MemoryPreferences, PLAYER_PREFERENCE_KEY, PLAYS_O_SENTINEL, PreferenceStore, Seats,
};
pub use rules::{Outcome, evaluate};
pub use search::{BestMove, WIN_SCORE, best_move};
pub use session::{Delays, Phase, Scoreboard, Session, Snapshot};
pub use timer::{TimerKind, TimerSlot, TimerToken};
pub use types::{Board, Mark, ParseBoardError, Square};
