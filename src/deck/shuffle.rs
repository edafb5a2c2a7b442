//! Deck shuffling.

use crate::cards::CardInstance;
use crate::core::GameRng;

/// Shuffle a deck in place with a uniform permutation.
///
/// Every ordering of the input is equally likely; the RNG's Fisher–Yates
/// pass replaces the biased fixed-count swap loops sometimes seen in
/// matching games. Determinism comes only from the injected seed.
pub fn shuffle(deck: &mut [CardInstance], rng: &mut GameRng) {
    rng.shuffle(deck);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfiguration;
    use crate::deck::{build_universe, draw_round_deck};

    #[test]
    fn test_shuffle_preserves_multiset() {
        let universe = build_universe();
        let config = GameConfiguration::new();
        let mut rng = GameRng::new(3);

        let mut deck = draw_round_deck(&universe, &config, &mut rng).unwrap();
        let mut before = deck.clone();

        shuffle(&mut deck, &mut rng);

        let mut after = deck;
        before.sort_by_key(|c| c.id);
        after.sort_by_key(|c| c.id);
        assert_eq!(before, after);
    }

    #[test]
    fn test_shuffle_deterministic_for_seed() {
        let universe = build_universe();
        let config = GameConfiguration::new();

        let mut rng1 = GameRng::new(11);
        let mut deck1 = draw_round_deck(&universe, &config, &mut rng1).unwrap();
        shuffle(&mut deck1, &mut rng1);

        let mut rng2 = GameRng::new(11);
        let mut deck2 = draw_round_deck(&universe, &config, &mut rng2).unwrap();
        shuffle(&mut deck2, &mut rng2);

        assert_eq!(deck1, deck2);
    }
}
