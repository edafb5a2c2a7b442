//! Card state store.
//!
//! The `CardStore` owns every card instance dealt into the current round
//! and is the single place card state is mutated. Lookups are by
//! `CardId`; iteration follows the shuffled deck order so presentation
//! can lay cards out stably.
//!
//! All mutations are synchronous and immediately visible to subsequent
//! reads. Unknown ids surface `EngineError::CardNotFound`.

use rustc_hash::FxHashMap;

use super::instance::{CardId, CardInstance};
use crate::error::EngineError;

/// Store of all card instances in the current round.
#[derive(Clone, Debug, Default)]
pub struct CardStore {
    cards: FxHashMap<CardId, CardInstance>,
    order: Vec<CardId>,
}

impl CardStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a shuffled deck, preserving its order.
    ///
    /// Panics if the deck contains duplicate instance ids; the deck
    /// builder assigns them densely so this indicates a construction bug.
    #[must_use]
    pub fn from_deck(deck: Vec<CardInstance>) -> Self {
        let mut store = Self {
            cards: FxHashMap::default(),
            order: Vec::with_capacity(deck.len()),
        };

        for card in deck {
            let id = card.id;
            if store.cards.insert(id, card).is_some() {
                panic!("duplicate card instance id {id} in deck");
            }
            store.order.push(id);
        }

        store
    }

    /// Get a card instance by ID.
    pub fn get(&self, id: CardId) -> Result<&CardInstance, EngineError> {
        self.cards.get(&id).ok_or(EngineError::CardNotFound(id))
    }

    /// Set whether a card shows its face.
    pub fn set_face_up(&mut self, id: CardId, face_up: bool) -> Result<(), EngineError> {
        let card = self.cards.get_mut(&id).ok_or(EngineError::CardNotFound(id))?;
        card.face_up = face_up;
        Ok(())
    }

    /// Set whether a card is removed from play.
    pub fn set_removed(&mut self, id: CardId, removed: bool) -> Result<(), EngineError> {
        let card = self.cards.get_mut(&id).ok_or(EngineError::CardNotFound(id))?;
        card.removed = removed;
        Ok(())
    }

    /// Check if a card ID is known to the store.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Number of card instances in the round.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the store holds no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate over the instances in deck (layout) order.
    pub fn iter(&self) -> impl Iterator<Item = &CardInstance> {
        self.order.iter().map(|id| &self.cards[id])
    }

    /// Face-up cards still in play, in layout order.
    ///
    /// Used when a round ends to flip pending selections back down.
    pub fn face_up_in_play(&self) -> impl Iterator<Item = &CardInstance> {
        self.iter().filter(|c| c.face_up && c.in_play())
    }
}
