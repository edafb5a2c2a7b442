//! Deck construction.
//!
//! A round's deck is drawn in two steps:
//!
//! 1. `build_universe` enumerates every identity the game can deal: the
//!    52 standard rank/suit combinations.
//! 2. `draw_round_deck` picks `distinct_card_count` identities uniformly
//!    without replacement, duplicates each `duplicate_count` times, and
//!    wraps them in fresh instances with densely assigned ids.
//!
//! The result is unshuffled; callers pass it through `deck::shuffle`
//! before dealing.

use crate::cards::{CardId, CardIdentity, CardInstance, Suit};
use crate::core::{GameConfiguration, GameRng};
use crate::error::EngineError;

/// Enumerate the universe of drawable card identities.
///
/// Returns all `13 * 4 = 52` rank/suit combinations, each exactly once.
#[must_use]
pub fn build_universe() -> Vec<CardIdentity> {
    let mut universe = Vec::with_capacity(CardIdentity::MAX_RANK as usize * Suit::ALL.len());
    for rank in 1..=CardIdentity::MAX_RANK {
        for suit in Suit::ALL {
            universe.push(CardIdentity::new(rank, suit));
        }
    }
    universe
}

/// Draw a round's deck from the universe.
///
/// Selects `config.distinct_card_count` distinct identities uniformly at
/// random without replacement, then creates `config.duplicate_count`
/// instances of each. Instance ids are assigned densely from 0 so they
/// double as layout indices once shuffled.
///
/// Fails with `EngineError::Configuration` if the universe cannot supply
/// enough distinct identities.
pub fn draw_round_deck(
    universe: &[CardIdentity],
    config: &GameConfiguration,
    rng: &mut GameRng,
) -> Result<Vec<CardInstance>, EngineError> {
    let distinct = config.distinct_card_count as usize;
    if distinct > universe.len() {
        return Err(EngineError::Configuration(format!(
            "distinct_card_count {} exceeds the {} identities in the universe",
            distinct,
            universe.len()
        )));
    }

    // Uniform draw without replacement: shuffle a copy, take the prefix.
    let mut pool = universe.to_vec();
    rng.shuffle(&mut pool);

    let mut deck = Vec::with_capacity(config.deck_size());
    let mut next_id = 0u32;
    for identity in pool.into_iter().take(distinct) {
        for _ in 0..config.duplicate_count {
            deck.push(CardInstance::new(CardId::new(next_id), identity));
            next_id += 1;
        }
    }

    Ok(deck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    #[test]
    fn test_universe_is_distinct() {
        let universe = build_universe();
        assert_eq!(universe.len(), 52);

        let mut seen = universe.clone();
        seen.sort_by_key(|c| (c.rank, c.suit.letter()));
        seen.dedup();
        assert_eq!(seen.len(), 52);
    }

    #[test]
    fn test_draw_deck_size_and_multiplicity() {
        let universe = build_universe();
        let config = GameConfiguration::new()
            .with_distinct_card_count(8)
            .with_duplicate_count(2);
        let mut rng = GameRng::new(42);

        let deck = draw_round_deck(&universe, &config, &mut rng).unwrap();
        assert_eq!(deck.len(), 16);

        let mut counts: FxHashMap<CardIdentity, u32> = FxHashMap::default();
        for card in &deck {
            *counts.entry(card.identity).or_default() += 1;
        }
        assert_eq!(counts.len(), 8);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn test_draw_assigns_dense_unique_ids() {
        let universe = build_universe();
        let config = GameConfiguration::new();
        let mut rng = GameRng::new(1);

        let deck = draw_round_deck(&universe, &config, &mut rng).unwrap();
        let ids: Vec<_> = deck.iter().map(|c| c.id.raw()).collect();
        assert_eq!(ids, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn test_draw_is_deterministic_for_seed() {
        let universe = build_universe();
        let config = GameConfiguration::new();

        let deck1 = draw_round_deck(&universe, &config, &mut GameRng::new(5)).unwrap();
        let deck2 = draw_round_deck(&universe, &config, &mut GameRng::new(5)).unwrap();
        assert_eq!(deck1, deck2);
    }

    #[test]
    fn test_draw_rejects_oversized_request() {
        let universe = build_universe();
        let config = GameConfiguration::new().with_distinct_card_count(53);
        let mut rng = GameRng::new(0);

        let err = draw_round_deck(&universe, &config, &mut rng).unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }

    #[test]
    fn test_full_universe_draw_is_allowed() {
        let universe = build_universe();
        let config = GameConfiguration::new().with_distinct_card_count(52);
        let mut rng = GameRng::new(0);

        let deck = draw_round_deck(&universe, &config, &mut rng).unwrap();
        assert_eq!(deck.len(), 104);
    }
}
