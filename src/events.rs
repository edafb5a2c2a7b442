//! Outbound engine events.
//!
//! Everything the presentation layer needs to repaint arrives as a
//! `GameEvent` on the channel it hands to `GameSession::new`. Events are
//! emitted in state order: a consumer that applies them sequentially
//! always renders a state the engine actually passed through.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardIdentity};
use crate::core::RoundOutcome;

/// A state change notification from the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A card turned face-up. Carries the identity so presentation can
    /// resolve the face image (`CardIdentity::asset_key`).
    CardRevealed {
        card: CardId,
        identity: CardIdentity,
    },

    /// A card flipped back face-down.
    CardHidden { card: CardId },

    /// A matched card left play. Its layout slot should go blank but
    /// remains occupied.
    CardRemoved { card: CardId },

    /// The score changed after a confirmed match.
    ScoreChanged { score: u32 },

    /// The countdown ticked.
    TimeChanged { seconds_remaining: u32 },

    /// The round reached a terminal state. No further events follow until
    /// the next `start`/`reset`.
    RoundEnded {
        outcome: RoundOutcome,
        final_score: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    #[test]
    fn test_serialization_round_trip() {
        let events = vec![
            GameEvent::CardRevealed {
                card: CardId::new(3),
                identity: CardIdentity::new(7, Suit::Hearts),
            },
            GameEvent::CardHidden { card: CardId::new(3) },
            GameEvent::CardRemoved { card: CardId::new(4) },
            GameEvent::ScoreChanged { score: 2 },
            GameEvent::TimeChanged { seconds_remaining: 12 },
            GameEvent::RoundEnded {
                outcome: RoundOutcome::Won,
                final_score: 8,
            },
        ];

        let json = serde_json::to_string(&events).unwrap();
        let deserialized: Vec<GameEvent> = serde_json::from_str(&json).unwrap();
        assert_eq!(events, deserialized);
    }
}
