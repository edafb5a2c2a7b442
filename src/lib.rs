//! # rust-pairs
//!
//! A turn-based memory card game engine: deal a deck of paired
//! identities face-down, reveal two cards per turn, score matches before
//! the countdown runs out.
//!
//! ## Design Principles
//!
//! 1. **Engine, not app**: rendering, dialogs, and assets live outside.
//!    Presentation calls `start`/`reset`/`handle_selection` and repaints
//!    from `GameEvent`s.
//!
//! 2. **Pure transitions, scheduled effects**: the turn machine returns
//!    synchronous state deltas; the session owns the reveal delay and the
//!    countdown, both as cancellable tasks.
//!
//! 3. **One lock**: the timer tick and the selection handler contend over
//!    the same round state, guarded by a single mutex, with events
//!    emitted in state order.
//!
//! 4. **Deterministic when seeded**: deck draw and shuffle flow through
//!    one seeded RNG, so tests pin exact layouts.
//!
//! ## Modules
//!
//! - `core`: configuration, RNG, round state
//! - `cards`: identities, instances, and the card state store
//! - `deck`: deck construction and uniform shuffling
//! - `turn`: the selection state machine
//! - `timer`: the pausable 1 Hz round countdown
//! - `session`: the presentation-facing controller
//! - `events`: outbound state-change notifications

pub mod cards;
pub mod core;
pub mod deck;
pub mod error;
pub mod events;
pub mod session;
pub mod timer;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{GameConfiguration, GameRng, RoundOutcome, RoundState};

pub use crate::cards::{CardId, CardIdentity, CardInstance, CardStore, Suit};

pub use crate::deck::{build_universe, draw_round_deck, shuffle};

pub use crate::error::EngineError;

pub use crate::events::GameEvent;

pub use crate::session::{GameSession, RoundSnapshot};

pub use crate::timer::{RoundTimer, TickOutcome};

pub use crate::turn::{RevealResolution, SelectionOutcome, TurnMachine, TurnPhase};
