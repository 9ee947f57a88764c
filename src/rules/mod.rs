//! Turn state machine for a duel.
//!
//! `MatchEngine` validates each player intent, runs the effect engine, keeps
//! the turn cycle (`Phase`) and decides the `MatchResult`.

pub mod engine;
pub mod phase;

pub use engine::{MatchEngine, PlayCue, PlayOutcome};
pub use phase::{MatchResult, Phase};
