//! Card identities - the logical value two matching cards share.
//!
//! A `CardIdentity` is a rank/suit pair from the standard playing card
//! set. Identities are immutable; matching compares them for equality.
//! Instance-specific state (face-up, removed) is stored separately in
//! `CardInstance`.
//!
//! The engine never loads card art. Presentation resolves an image for a
//! revealed card from `asset_key()`, a `"7h"`-style token.

use serde::{Deserialize, Serialize};

/// Playing card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Spades,
    Hearts,
    Diamonds,
}

impl Suit {
    /// All four suits, in asset-key order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Spades, Suit::Hearts, Suit::Diamonds];

    /// One-letter token used in asset keys.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
        }
    }
}

/// The logical identity of a card: rank 1..=13 plus a suit.
///
/// Two card instances match when their identities are equal.
///
/// ```
/// use rust_pairs::cards::{CardIdentity, Suit};
///
/// let seven = CardIdentity::new(7, Suit::Hearts);
/// assert_eq!(seven.asset_key(), "7h");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardIdentity {
    /// Rank, 1 (ace) through 13 (king).
    pub rank: u8,

    /// Suit of the card.
    pub suit: Suit,
}

impl CardIdentity {
    /// Highest rank in the standard set.
    pub const MAX_RANK: u8 = 13;

    /// Create an identity.
    ///
    /// Panics if `rank` is outside 1..=13; identities only come from
    /// `standard_universe` or test code.
    #[must_use]
    pub fn new(rank: u8, suit: Suit) -> Self {
        assert!(
            (1..=Self::MAX_RANK).contains(&rank),
            "rank must be 1..=13, got {rank}"
        );
        Self { rank, suit }
    }

    /// Token presentation uses to resolve this card's face image,
    /// e.g. `"1c"` or `"13d"`.
    #[must_use]
    pub fn asset_key(&self) -> String {
        format!("{}{}", self.rank, self.suit.letter())
    }
}

impl std::fmt::Display for CardIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.asset_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_keys() {
        assert_eq!(CardIdentity::new(1, Suit::Clubs).asset_key(), "1c");
        assert_eq!(CardIdentity::new(10, Suit::Spades).asset_key(), "10s");
        assert_eq!(CardIdentity::new(13, Suit::Diamonds).asset_key(), "13d");
    }

    #[test]
    fn test_equality_is_matching() {
        let a = CardIdentity::new(4, Suit::Hearts);
        let b = CardIdentity::new(4, Suit::Hearts);
        let c = CardIdentity::new(4, Suit::Spades);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    #[should_panic(expected = "rank must be 1..=13")]
    fn test_rank_out_of_range_panics() {
        CardIdentity::new(14, Suit::Clubs);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CardIdentity::new(12, Suit::Hearts)), "12h");
    }

    #[test]
    fn test_serialization() {
        let id = CardIdentity::new(9, Suit::Diamonds);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: CardIdentity = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
