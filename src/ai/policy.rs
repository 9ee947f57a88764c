//! Card choice for computer-controlled seats.
//!
//! Policies are trait-based so a host can plug in something smarter than the
//! uniform pick.

use crate::cards::CardId;
use crate::core::{EngineResult, GameRng, InvalidState};

/// Chooses which hand card an AI seat plays.
pub trait DecisionPolicy: Send + Sync {
    /// Pick an index into `hand`.
    ///
    /// Calling with an empty hand is a caller bug and fails with
    /// `InvalidState::EmptyHand`.
    fn choose_card_index(&self, hand: &[CardId], rng: &mut GameRng) -> EngineResult<usize>;
}

/// Uniformly random card choice. No look-ahead.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPolicy;

impl DecisionPolicy for RandomPolicy {
    fn choose_card_index(&self, hand: &[CardId], rng: &mut GameRng) -> EngineResult<usize> {
        rng.gen_index(hand.len())
            .ok_or_else(|| InvalidState::EmptyHand.into())
    }
}

/// Always plays the first card in hand. Useful for scripted matches.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstCardPolicy;

impl DecisionPolicy for FirstCardPolicy {
    fn choose_card_index(&self, hand: &[CardId], _rng: &mut GameRng) -> EngineResult<usize> {
        if hand.is_empty() {
            return Err(InvalidState::EmptyHand.into());
        }
        Ok(0)
    }
}
