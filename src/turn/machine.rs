//! Turn state machine.
//!
//! Tracks the selection sequence for the round and applies match
//! evaluation to the card store. The machine is purely synchronous: it
//! returns what changed and leaves scheduling (the reveal delay, the
//! countdown) to the session layer, so every transition can be tested
//! without a runtime.
//!
//! ## Phases
//!
//! ```text
//! AwaitingFirst --select--> AwaitingSecond --select--> Locked
//!      ^                                                 |
//!      +----------- resolve_locked (mismatch/match) -----+
//!                    (last match) --> RoundOver(Won)
//! any phase --force_timeout--> RoundOver(Timeout)
//! ```
//!
//! Selections that arrive in the wrong phase, re-select the pending card,
//! or point at a removed card are ignored, not errors. Only an id the
//! store has never heard of surfaces `EngineError::CardNotFound`.

use smallvec::SmallVec;

use crate::cards::{CardId, CardStore};
use crate::core::{RoundOutcome, RoundState};
use crate::error::EngineError;

/// Where the machine is in the selection sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    /// No selection pending.
    AwaitingFirst,
    /// One card revealed, waiting for its candidate partner.
    AwaitingSecond { first: CardId },
    /// Two cards revealed; resolution is scheduled after the reveal delay.
    /// No selection is accepted until it runs.
    Locked {
        first: CardId,
        second: CardId,
        matched: bool,
    },
    /// Terminal. Only `start`/`reset` leaves this phase.
    RoundOver { outcome: RoundOutcome },
}

/// Synchronous result of a selection attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The selection was a no-op (wrong phase, pending card re-selected,
    /// or card already removed).
    Ignored,
    /// A first card turned face-up.
    FirstRevealed(CardId),
    /// A second card turned face-up; the pair is now locked for
    /// evaluation. `matched` reports the identity comparison.
    PairRevealed {
        first: CardId,
        second: CardId,
        matched: bool,
    },
}

/// State changes applied by `resolve_locked`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealResolution {
    /// The pair that was locked, in selection order.
    pub cards: [CardId; 2],
    /// Whether the pair matched (removed) or not (flipped back).
    pub matched: bool,
    /// The score after this resolution, set when `matched`.
    pub new_score: Option<u32>,
    /// Whether this resolution completed the final pair.
    pub won: bool,
}

/// The round's selection state machine.
#[derive(Clone, Debug)]
pub struct TurnMachine {
    phase: TurnPhase,
}

impl Default for TurnMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnMachine {
    /// Create a machine awaiting the round's first selection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: TurnPhase::AwaitingFirst,
        }
    }

    /// The current phase.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Is a revealed pair waiting for resolution?
    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self.phase, TurnPhase::Locked { .. })
    }

    /// Has the round reached a terminal state?
    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self.phase, TurnPhase::RoundOver { .. })
    }

    /// The terminal outcome, once reached.
    #[must_use]
    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.phase {
            TurnPhase::RoundOver { outcome } => Some(outcome),
            _ => None,
        }
    }

    /// The pending first selection, if any.
    #[must_use]
    pub fn pending_selection(&self) -> Option<CardId> {
        match self.phase {
            TurnPhase::AwaitingSecond { first } => Some(first),
            _ => None,
        }
    }

    /// Apply a player selection.
    ///
    /// Reveals the card and advances the phase per the transition table.
    /// Ignored selections leave the store and phase untouched. An unknown
    /// id fails with `CardNotFound` before any state changes.
    pub fn select(
        &mut self,
        store: &mut CardStore,
        id: CardId,
    ) -> Result<SelectionOutcome, EngineError> {
        match self.phase {
            TurnPhase::Locked { .. } | TurnPhase::RoundOver { .. } => {
                // Probe the store anyway so integration errors surface
                // even while selections are being ignored.
                store.get(id)?;
                Ok(SelectionOutcome::Ignored)
            }
            TurnPhase::AwaitingFirst => {
                if !store.get(id)?.in_play() {
                    return Ok(SelectionOutcome::Ignored);
                }
                store.set_face_up(id, true)?;
                self.phase = TurnPhase::AwaitingSecond { first: id };
                Ok(SelectionOutcome::FirstRevealed(id))
            }
            TurnPhase::AwaitingSecond { first } => {
                let card = store.get(id)?;
                // Re-selecting the pending card is a no-op, not a deselect.
                if id == first || !card.in_play() {
                    return Ok(SelectionOutcome::Ignored);
                }
                let matched = {
                    let first_card = store
                        .get(first)
                        .expect("pending selection vanished from store");
                    first_card.identity == card.identity
                };
                store.set_face_up(id, true)?;
                self.phase = TurnPhase::Locked {
                    first,
                    second: id,
                    matched,
                };
                Ok(SelectionOutcome::PairRevealed {
                    first,
                    second: id,
                    matched,
                })
            }
        }
    }

    /// Resolve a locked pair after the reveal delay.
    ///
    /// A match removes both cards and scores; reaching
    /// `distinct_card_count` ends the round as won. A mismatch flips both
    /// back face-down. Returns `None` when the machine is not locked
    /// (the round ended or was reset while the delay was pending), which
    /// makes a stale deferred resolution a harmless no-op.
    pub fn resolve_locked(
        &mut self,
        store: &mut CardStore,
        state: &mut RoundState,
        distinct_card_count: u32,
    ) -> Option<RevealResolution> {
        let TurnPhase::Locked {
            first,
            second,
            matched,
        } = self.phase
        else {
            return None;
        };

        let mut new_score = None;
        let mut won = false;
        if matched {
            for id in [first, second] {
                store
                    .set_removed(id, true)
                    .expect("locked card vanished from store");
            }
            let score = state.record_match();
            new_score = Some(score);
            won = score == distinct_card_count;
        } else {
            for id in [first, second] {
                store
                    .set_face_up(id, false)
                    .expect("locked card vanished from store");
            }
        }

        self.phase = if won {
            TurnPhase::RoundOver {
                outcome: RoundOutcome::Won,
            }
        } else {
            TurnPhase::AwaitingFirst
        };

        Some(RevealResolution {
            cards: [first, second],
            matched,
            new_score,
            won,
        })
    }

    /// End the round on timeout.
    ///
    /// Flips any face-up, in-play cards back down (a pending first
    /// selection or a locked pair) and moves to `RoundOver(Timeout)`.
    /// Returns the flipped cards. Does nothing if the round is already
    /// over, so a win that landed on the same tick keeps its outcome.
    pub fn force_timeout(&mut self, store: &mut CardStore) -> SmallVec<[CardId; 2]> {
        if self.is_over() {
            return SmallVec::new();
        }

        let pending: SmallVec<[CardId; 2]> =
            store.face_up_in_play().map(|c| c.id).collect();
        for &id in &pending {
            store
                .set_face_up(id, false)
                .expect("face-up card vanished from store");
        }

        self.phase = TurnPhase::RoundOver {
            outcome: RoundOutcome::Timeout,
        };
        pending
    }
}
