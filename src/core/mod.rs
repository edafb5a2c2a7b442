//! Core engine types: configuration, RNG, round state.
//!
//! This module holds the building blocks the rest of the engine composes:
//! the round configuration supplied by the presentation layer, the seeded
//! RNG behind deck draws and shuffles, and the mutable round scalars.

pub mod config;
pub mod rng;
pub mod state;

pub use config::GameConfiguration;
pub use rng::GameRng;
pub use state::{RoundOutcome, RoundState};
