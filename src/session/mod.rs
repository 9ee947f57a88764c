//! Match drivers on top of the rules engine.
//!
//! - `Duel`: human vs AI session with battle log and settlement
//! - `autoplay`: policy vs policy, for balancing and benchmarks

mod autoplay;
mod duel;

pub use autoplay::{autoplay, AutoplayConfig, AutoplayError, AutoplayRecord};
pub use duel::{Duel, DuelSetup, PlayReport, TurnOwner};
