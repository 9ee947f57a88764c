//! Settlement adapter: recording a finished match on an external ledger.
//!
//! The engine never talks to a ledger itself. A `Duel` calls its
//! `Settlement` when the match is dealt (deck commitment) and once when it
//! ends (result); whatever happens there has no
//! effect on the match state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::CardId;
use crate::core::PlayerId;

/// Host-assigned match identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub u64);

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Match({})", self.0)
    }
}

/// What gets recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementOutcome {
    /// The human seat won.
    RecordWin { winner: PlayerId },
    /// The human seat lost.
    Concede,
}

/// One settlement call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SettlementRequest {
    pub match_id: MatchId,
    pub outcome: SettlementOutcome,
}

/// Deck list committed to the ledger when a match is dealt.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeckRecord {
    pub match_id: MatchId,
    /// Root seed of the duel; with the card list it reproduces the deal.
    pub seed: u64,
    /// Human seat's cards in dealt order: hand first, then deck top first.
    pub cards: Vec<CardId>,
}

/// Settlement failure, reported by the adapter.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SettlementError {
    #[error("ledger rejected {0}: {1}")]
    Rejected(MatchId, String),

    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

/// External ledger a match is reported to.
pub trait Settlement {
    /// Submit one request. Not retried by the caller.
    fn settle(&mut self, request: SettlementRequest) -> Result<(), SettlementError>;

    /// Commit the dealt deck at match start. Ledgers without deck
    /// commitments keep the default, which accepts and drops the record.
    fn record_deck(&mut self, record: DeckRecord) -> Result<(), SettlementError> {
        let _ = record;
        Ok(())
    }
}

/// Discards every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSettlement;

impl Settlement for NoopSettlement {
    fn settle(&mut self, _request: SettlementRequest) -> Result<(), SettlementError> {
        Ok(())
    }
}

/// Keeps every request in memory, optionally failing each call.
#[derive(Clone, Debug, Default)]
pub struct RecordingSettlement {
    requests: Vec<SettlementRequest>,
    decks: Vec<DeckRecord>,
    failure: Option<SettlementError>,
}

impl RecordingSettlement {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record requests and deck lists but answer each with `error`.
    #[must_use]
    pub fn failing(error: SettlementError) -> Self {
        Self {
            requests: Vec::new(),
            decks: Vec::new(),
            failure: Some(error),
        }
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> &[SettlementRequest] {
        &self.requests
    }

    /// Deck records received so far, oldest first.
    #[must_use]
    pub fn decks(&self) -> &[DeckRecord] {
        &self.decks
    }
}

impl Settlement for RecordingSettlement {
    fn settle(&mut self, request: SettlementRequest) -> Result<(), SettlementError> {
        self.requests.push(request);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn record_deck(&mut self, record: DeckRecord) -> Result<(), SettlementError> {
        self.decks.push(record);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
