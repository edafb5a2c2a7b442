//! Round configuration.
//!
//! A `GameConfiguration` describes everything a session needs to deal a
//! round: how many distinct card identities to draw, how many copies of
//! each, how long the countdown runs, and how long a revealed pair stays
//! visible before it resolves. The configuration is immutable for the
//! lifetime of a round; `start`/`reset` accept a fresh one.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Configuration for one round of the matching game.
///
/// Built with defaults and refined through the builder methods:
///
/// ```
/// use rust_pairs::core::GameConfiguration;
///
/// let config = GameConfiguration::new()
///     .with_distinct_card_count(6)
///     .with_round_duration_seconds(45)
///     .with_seed(42);
///
/// assert_eq!(config.deck_size(), 12);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfiguration {
    /// Number of distinct card identities drawn for the round.
    pub distinct_card_count: u32,

    /// Copies of each identity in the deck. Must be at least 2.
    pub duplicate_count: u32,

    /// Countdown length for the round, in whole seconds.
    pub round_duration_seconds: u32,

    /// How long a revealed pair stays visible before removal or flip-back.
    pub reveal_delay_millis: u64,

    /// RNG seed for deck draw and shuffle. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfiguration {
    fn default() -> Self {
        Self {
            distinct_card_count: 8,
            duplicate_count: 2,
            round_duration_seconds: 30,
            reveal_delay_millis: 300,
            seed: None,
        }
    }
}

impl GameConfiguration {
    /// Create a configuration with the default rules: 8 distinct cards,
    /// 2 copies each, a 30 second round, and a 300 ms reveal delay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of distinct identities to draw.
    #[must_use]
    pub fn with_distinct_card_count(mut self, count: u32) -> Self {
        self.distinct_card_count = count;
        self
    }

    /// Set the number of copies of each identity.
    #[must_use]
    pub fn with_duplicate_count(mut self, count: u32) -> Self {
        self.duplicate_count = count;
        self
    }

    /// Set the round countdown length in seconds.
    #[must_use]
    pub fn with_round_duration_seconds(mut self, seconds: u32) -> Self {
        self.round_duration_seconds = seconds;
        self
    }

    /// Set the reveal delay in milliseconds.
    #[must_use]
    pub fn with_reveal_delay_millis(mut self, millis: u64) -> Self {
        self.reveal_delay_millis = millis;
        self
    }

    /// Inject an RNG seed so the deal is reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Total number of card instances in a round's deck.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.distinct_card_count as usize * self.duplicate_count as usize
    }

    /// The reveal delay as a `Duration`.
    #[must_use]
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_millis)
    }

    /// Check that this configuration can produce a playable round.
    ///
    /// Called by `start`/`reset` before any state is committed. The draw
    /// step separately checks the universe capacity, since only it knows
    /// how many identities exist.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.distinct_card_count == 0 {
            return Err(EngineError::Configuration(
                "distinct_card_count must be at least 1".into(),
            ));
        }
        if self.duplicate_count < 2 {
            return Err(EngineError::Configuration(
                "duplicate_count must be at least 2".into(),
            ));
        }
        if self.round_duration_seconds == 0 {
            return Err(EngineError::Configuration(
                "round_duration_seconds must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfiguration::new();

        assert_eq!(config.distinct_card_count, 8);
        assert_eq!(config.duplicate_count, 2);
        assert_eq!(config.round_duration_seconds, 30);
        assert_eq!(config.reveal_delay_millis, 300);
        assert_eq!(config.seed, None);
        assert_eq!(config.deck_size(), 16);
    }

    #[test]
    fn test_builder() {
        let config = GameConfiguration::new()
            .with_distinct_card_count(4)
            .with_duplicate_count(3)
            .with_round_duration_seconds(60)
            .with_reveal_delay_millis(150)
            .with_seed(99);

        assert_eq!(config.deck_size(), 12);
        assert_eq!(config.reveal_delay(), Duration::from_millis(150));
        assert_eq!(config.seed, Some(99));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_cards() {
        let config = GameConfiguration::new().with_distinct_card_count(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_single_copies() {
        let config = GameConfiguration::new().with_duplicate_count(1);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate_count"));
    }

    #[test]
    fn test_validate_rejects_zero_duration() {
        let config = GameConfiguration::new().with_round_duration_seconds(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let config = GameConfiguration::new().with_seed(5);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
