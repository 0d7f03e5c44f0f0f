//! Stored player preference and seat assignment.

use crate::Mark;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Key under which the preferred mark is stored.
pub const PLAYER_PREFERENCE_KEY: &str = "player";

/// Stored value that seats the human as O.
pub const PLAYS_O_SENTINEL: &str = "0";

/// Read-only key-value lookup for stored preferences.
pub trait PreferenceStore {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
}

/// Preferences held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl MemoryPreferences {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Which mark each side plays for a whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Seats {
    human: Mark,
    adversary: Mark,
}

impl Seats {
    /// Seats the human as `human` and the adversary as the other mark.
    pub fn new(human: Mark) -> Self {
        Self {
            human,
            adversary: human.opponent(),
        }
    }

    /// Mark clicked in by the human.
    pub fn human(&self) -> Mark {
        self.human
    }

    /// Mark chosen by the search.
    pub fn adversary(&self) -> Mark {
        self.adversary
    }

    /// Seats from a stored preference value.
    ///
    /// `"0"` seats the human as O; anything else, including no value, as X.
    #[instrument]
    pub fn from_preference(value: Option<&str>) -> Self {
        let human = if value == Some(PLAYS_O_SENTINEL) {
            Mark::O
        } else {
            Mark::X
        };
        debug!(%human, "Seats assigned from preference");
        Self::new(human)
    }

    /// Reads the player preference once from `store`.
    #[instrument(skip(store))]
    pub fn from_store(store: &dyn PreferenceStore) -> Self {
        let value = store.get(PLAYER_PREFERENCE_KEY);
        Self::from_preference(value.as_deref())
    }
}

impl Default for Seats {
    fn default() -> Self {
        Self::new(Mark::X)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_seats_human_as_o() {
        let seats = Seats::from_preference(Some("0"));
        assert_eq!(seats.human(), Mark::O);
        assert_eq!(seats.adversary(), Mark::X);
    }

    #[test]
    fn test_other_values_seat_human_as_x() {
        for value in [None, Some("1"), Some("X"), Some(""), Some("00")] {
            let seats = Seats::from_preference(value);
            assert_eq!(seats.human(), Mark::X, "value {:?}", value);
            assert_eq!(seats.adversary(), Mark::O);
        }
    }

    #[test]
    fn test_reads_player_key_from_store() {
        let store = MemoryPreferences::new().with(PLAYER_PREFERENCE_KEY, "0");
        assert_eq!(Seats::from_store(&store).human(), Mark::O);
        assert_eq!(Seats::from_store(&MemoryPreferences::new()).human(), Mark::X);
    }
}
