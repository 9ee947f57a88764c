//! # arcane-duels
//!
//! Deterministic turn and effect engine for a two-seat dueling card game.
//!
//! ## Design Principles
//!
//! 1. **Copy-then-commit**: Every transition takes `&MatchState` and returns a
//!    new state. A rejected move is an error and the old state stays current.
//!
//! 2. **Injected randomness**: Shuffles and AI picks draw from a seeded
//!    `GameRng` handed in by the caller. Same seed, same match.
//!
//! 3. **Closed effects**: Card effects are an enum with one handler per
//!    variant in the effect engine.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) state cloning via `im-rs`, so
//!   working on a copy costs next to nothing.
//!
//! - **Outer collaborators at the edge**: Presentation reads `MatchState`,
//!   the battle log and `PlayCue`s; settlement is a trait the session calls
//!   once when a match ends.
//!
//! ## Modules
//!
//! - `core`: Seats, match state, RNG, level configuration, battle log, errors
//! - `cards`: Card definitions, catalog and the built-in card set
//! - `effects`: Card effects, player statuses and the effect engine
//! - `rules`: Turn state machine and match results
//! - `ai`: Decision policies for computer seats
//! - `settlement`: Ledger adapter contract
//! - `session`: Human vs AI duel driver and unattended autoplay
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use arcane_duels::ai::RandomPolicy;
//! use arcane_duels::cards::standard_catalog;
//! use arcane_duels::core::LevelConfig;
//! use arcane_duels::rules::MatchEngine;
//! use arcane_duels::session::{Duel, DuelSetup, TurnOwner};
//! use arcane_duels::settlement::{MatchId, NoopSettlement};
//!
//! let engine = MatchEngine::new(Arc::new(standard_catalog()));
//! let level = LevelConfig::preset(1).unwrap();
//! let mut duel = Duel::start(engine, &level, DuelSetup::new(MatchId(1), 42), NoopSettlement, RandomPolicy)
//!     .unwrap();
//!
//! assert_eq!(duel.turn_owner(), Some(TurnOwner::Human));
//! let report = duel.play_human(0).unwrap();
//! assert_eq!(report.entry.turn, 1);
//! assert_eq!(duel.log().len(), 1);
//! ```

pub mod core;
pub mod cards;
pub mod effects;
pub mod rules;
pub mod ai;
pub mod settlement;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    BattleLog, ConfigError, EngineResult, GameRng, GameRngState, InvalidMove, InvalidState,
    LevelConfig, LevelId, LogEntry, MatchError, MatchState, Player, PlayerId, PlayerPair,
    SeatConfig, SnapshotError,
};

pub use crate::cards::{standard_catalog, standard_deck, Card, CardCatalog, CardId, Keyword};

pub use crate::effects::{ActiveEffect, CardEffect, EffectEngine, EffectKind, GlobalEffect, Pulse};

pub use crate::rules::{MatchEngine, MatchResult, Phase, PlayCue, PlayOutcome};

pub use crate::ai::{DecisionPolicy, RandomPolicy};

pub use crate::settlement::{
    DeckRecord, MatchId, NoopSettlement, RecordingSettlement, Settlement, SettlementError,
    SettlementOutcome, SettlementRequest,
};

pub use crate::session::{Duel, DuelSetup, PlayReport, TurnOwner};
