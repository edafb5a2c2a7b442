//! Round-level mutable state.
//!
//! `RoundState` holds the scalars that both the selection path and the
//! timer tick read-modify-write: the score and the remaining seconds.
//! The selection sequence itself (pending card, lock) lives in the turn
//! state machine's phase; see `turn::TurnMachine`.

use serde::{Deserialize, Serialize};

/// How a finished round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Every pair was found before the countdown expired.
    Won,
    /// The countdown reached zero first.
    Timeout,
}

/// Mutable scalar state for the round in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    score: u32,
    seconds_remaining: u32,
}

impl RoundState {
    /// Create state for a fresh round with the full countdown.
    #[must_use]
    pub fn new(round_duration_seconds: u32) -> Self {
        Self {
            score: 0,
            seconds_remaining: round_duration_seconds,
        }
    }

    /// Pairs matched so far.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Seconds left on the round countdown.
    #[must_use]
    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    /// Record one confirmed match and return the new score.
    ///
    /// The score only ever moves in increments of 1.
    pub fn record_match(&mut self) -> u32 {
        self.score += 1;
        self.score
    }

    /// Consume one second of the countdown and return the new remainder.
    ///
    /// Saturates at zero; the caller stops ticking once zero is reached.
    pub fn consume_second(&mut self) -> u32 {
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        self.seconds_remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_round_state() {
        let state = RoundState::new(30);
        assert_eq!(state.score(), 0);
        assert_eq!(state.seconds_remaining(), 30);
    }

    #[test]
    fn test_record_match_increments_by_one() {
        let mut state = RoundState::new(30);
        assert_eq!(state.record_match(), 1);
        assert_eq!(state.record_match(), 2);
        assert_eq!(state.score(), 2);
    }

    #[test]
    fn test_consume_second_saturates() {
        let mut state = RoundState::new(2);
        assert_eq!(state.consume_second(), 1);
        assert_eq!(state.consume_second(), 0);
        assert_eq!(state.consume_second(), 0);
    }

    #[test]
    fn test_serialization() {
        let state = RoundState::new(10);
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: RoundState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
