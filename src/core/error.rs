//! Error types.
//!
//! - `MatchError::InvalidMove`: the caller asked for something the rules do
//!   not allow right now. Raised before any mutation; the state is unchanged.
//! - `MatchError::InvalidState`: a precondition the caller was responsible
//!   for did not hold. Signals a bug in the caller.
//! - `ConfigError`: a level configuration could not be loaded or validated.
//! - `SnapshotError`: a state snapshot could not be encoded or decoded.

use thiserror::Error;

use super::player::PlayerId;
use crate::cards::CardId;
use crate::rules::Phase;

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, MatchError>;

/// Rejected player action.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidMove {
    #[error("{actual} acted during {expected}'s turn")]
    NotYourTurn { expected: PlayerId, actual: PlayerId },

    #[error("expected phase {expected:?}, match is in {actual:?}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("hand index {index} out of range for hand of {len}")]
    HandIndexOutOfRange { index: usize, len: usize },

    #[error("{0} is not in the acting player's hand")]
    CardNotInHand(CardId),

    #[error("hand is full")]
    HandFull,

    #[error("match is over")]
    MatchOver,
}

/// Violated caller precondition.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidState {
    #[error("cannot choose a card from an empty hand")]
    EmptyHand,

    #[error("{0} is not in the card catalog")]
    UnknownCard(CardId),

    #[error("{0} is registered twice")]
    DuplicateCard(CardId),
}

/// Error raised by engine operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("invalid move: {0}")]
    InvalidMove(#[from] InvalidMove),

    #[error("invalid state: {0}")]
    InvalidState(#[from] InvalidState),
}

impl MatchError {
    /// Whether the error is a rejected move (state unchanged, retry allowed).
    #[must_use]
    pub fn is_invalid_move(&self) -> bool {
        matches!(self, Self::InvalidMove(_))
    }
}

/// Level configuration failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse level config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("starting hand of {requested} exceeds the hand cap of {cap}")]
    HandTooLarge { requested: usize, cap: usize },

    #[error("the first mover would start with no cards")]
    EmptyOpeningHand,

    #[error("{0} has an empty deck")]
    EmptyDeck(PlayerId),

    #[error("{player} starts with {hp} hp")]
    NoStartingHp { player: PlayerId, hp: u32 },

    #[error("{player}'s deck lists {card}, which is not in the catalog")]
    UnknownCard { player: PlayerId, card: CardId },
}

/// Snapshot encode/decode failure.
#[derive(Debug, Error)]
#[error("snapshot codec failed: {0}")]
pub struct SnapshotError(#[from] pub bincode::Error);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err: MatchError = InvalidMove::HandIndexOutOfRange { index: 7, len: 4 }.into();
        assert_eq!(err.to_string(), "invalid move: hand index 7 out of range for hand of 4");
        assert!(err.is_invalid_move());

        let err: MatchError = InvalidState::EmptyHand.into();
        assert_eq!(err.to_string(), "invalid state: cannot choose a card from an empty hand");
        assert!(!err.is_invalid_move());
    }

    #[test]
    fn test_not_your_turn_names_seats() {
        let err = InvalidMove::NotYourTurn {
            expected: PlayerId::FIRST,
            actual: PlayerId::SECOND,
        };
        assert_eq!(err.to_string(), "Seat 1 acted during Seat 0's turn");
    }

    #[test]
    fn test_config_parse_error() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = ConfigError::from(parse);
        assert!(err.to_string().starts_with("failed to parse level config"));
    }
}
