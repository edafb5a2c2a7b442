//! Turn state machine: selection sequencing and match evaluation.

pub mod machine;

pub use machine::{RevealResolution, SelectionOutcome, TurnMachine, TurnPhase};
