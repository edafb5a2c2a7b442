//! Engine error types.
//!
//! Only recoverable failures surface as errors. Invalid selections
//! (double-select, select while locked, select a removed card) are part of
//! the normal state-machine contract and are silently ignored instead.

use thiserror::Error;

use crate::cards::CardId;

/// Errors surfaced by the engine to the presentation layer.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The supplied `GameConfiguration` cannot produce a playable round.
    ///
    /// Raised by `start`/`reset` before any state is committed.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A card instance id is unknown to the store.
    ///
    /// This indicates an integration bug in the presentation wiring; the
    /// session logs it and treats the selection as a no-op.
    #[error("unknown card instance {0}")]
    CardNotFound(CardId),

    /// No async runtime was available to schedule the round timer.
    ///
    /// Fatal to the `start` call that needed it.
    #[error("no runtime available to schedule the round timer")]
    Scheduler,
}
