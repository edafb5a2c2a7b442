//! Deck construction and shuffling.
//!
//! `builder` draws a round's multiset of card instances from the identity
//! universe; `shuffle` randomizes their order. Both are deterministic
//! under an injected RNG seed, which is how the integration tests pin
//! down exact layouts.

pub mod builder;
pub mod shuffle;

pub use builder::{build_universe, draw_round_deck};
pub use shuffle::shuffle;
