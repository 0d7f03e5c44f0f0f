//! Cancellable one-shot timers owned by a session.
//!
//! The session never sleeps. It records at most one pending [`TimerToken`];
//! whoever drives the session waits out the token's delay and hands it back.
//! Scheduling or cancelling replaces the pending token, so a token that
//! comes back late no longer matches and is dropped.

use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// What happens when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
pub enum TimerKind {
    /// The adversary places its mark.
    AdversaryMove,
    /// The finished round is cleared for the next one.
    RoundReset,
}

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimerToken {
    id: u64,
    kind: TimerKind,
    delay: Duration,
}

impl TimerToken {
    /// Unique within the owning slot.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Action to run when the timer fires.
    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    /// How long to wait before firing.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Holds the single pending timer of a session.
#[derive(Debug, Clone, Default)]
pub struct TimerSlot {
    next_id: u64,
    pending: Option<TimerToken>,
}

impl TimerSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a timer, superseding any pending one.
    #[instrument(skip(self))]
    pub fn schedule(&mut self, kind: TimerKind, delay: Duration) -> TimerToken {
        let token = TimerToken {
            id: self.next_id,
            kind,
            delay,
        };
        self.next_id += 1;
        if let Some(old) = self.pending.replace(token) {
            debug!(superseded = old.id, timer_id = token.id, "Timer superseded");
        }
        token
    }

    /// Drops the pending timer, if any.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) {
        if let Some(old) = self.pending.take() {
            debug!(timer_id = old.id, kind = %old.kind, "Timer cancelled");
        }
    }

    /// The pending timer, if any.
    pub fn pending(&self) -> Option<TimerToken> {
        self.pending
    }

    /// Claims the pending timer if `token` is still the pending one.
    ///
    /// Returns `false` for stale tokens and leaves the slot untouched.
    pub fn claim(&mut self, token: TimerToken) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
