//! Card instances - runtime card state.
//!
//! `CardInstance` represents one physical card dealt into a round. It
//! tracks the mutable per-round state the turn machine drives: whether
//! the card is face-up and whether it has been matched and removed.
//!
//! Removal is a visibility flag, not deallocation. A matched card stays
//! in the store for the rest of the round so presentation can keep its
//! slot in the layout.

use serde::{Deserialize, Serialize};

use super::identity::CardIdentity;

/// Unique identifier for a card instance within a round.
///
/// Ids are assigned densely from 0 when the round's deck is drawn, so
/// presentation can use them directly as layout indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card instance ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A card instance in a round.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique instance ID within the round.
    pub id: CardId,

    /// The logical identity this instance carries.
    pub identity: CardIdentity,

    /// Is the card currently showing its face?
    pub face_up: bool,

    /// Has the card been matched and taken out of play?
    pub removed: bool,
}

impl CardInstance {
    /// Create a face-down, in-play instance.
    #[must_use]
    pub fn new(id: CardId, identity: CardIdentity) -> Self {
        Self {
            id,
            identity,
            face_up: false,
            removed: false,
        }
    }

    /// Is this card still selectable? Removed cards stay in the store but
    /// no longer participate in turns.
    #[must_use]
    pub fn in_play(&self) -> bool {
        !self.removed
    }

    /// Check whether this instance matches another by identity.
    #[must_use]
    pub fn matches(&self, other: &CardInstance) -> bool {
        self.identity == other.identity
    }
}
