//! Turn phases and match outcomes.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Where a match is in its turn cycle.
///
/// Callers only ever see `AwaitingDraw`, `AwaitingPlay` and `Gameover`;
/// `Resolving` and `AwaitingOpponent` exist while a play is being computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// The current player must draw.
    AwaitingDraw,
    /// The current player must play a card.
    AwaitingPlay,
    /// A card is being applied.
    Resolving,
    /// The play resolved; the turn is passing.
    AwaitingOpponent,
    /// Terminal. No further mutation is accepted.
    Gameover,
}

/// Result of a completed match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    /// Single winner.
    Winner(PlayerId),
    /// Both players fell in the same resolution.
    Draw,
}

impl MatchResult {
    /// The winning seat, if any.
    #[must_use]
    pub fn winner(self) -> Option<PlayerId> {
        match self {
            MatchResult::Winner(p) => Some(p),
            MatchResult::Draw => None,
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(self, player: PlayerId) -> bool {
        self.winner() == Some(player)
    }
}
