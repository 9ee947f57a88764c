//! Match state: players, turn bookkeeping and outcome.
//!
//! ## Player
//!
//! Per-seat mutable aggregate: hp, attack, defense, hand, deck, discard pile
//! and the active status effects.
//!
//! ## MatchState
//!
//! Everything needed to continue a match:
//! - Turn counter and whose turn it is
//! - Both players
//! - Level-wide modifiers
//! - Current phase and, once over, the result
//!
//! Collections are `im` persistent structures (or small inline vectors), so
//! cloning a state is cheap. Every transition works on a clone and returns it
//! whole; the input state is never touched.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::LevelId;
use super::player::{PlayerId, PlayerPair};
use crate::cards::CardId;
use crate::effects::{ActiveEffect, EffectKind, GlobalEffect};
use crate::rules::{MatchResult, Phase};

/// Hand size cap.
pub const MAX_HAND_SIZE: usize = 5;

/// Hp a player returns with when a pending resurrect fires.
pub const RESURRECT_HP: u32 = 15;

/// Cards held in hand, oldest first.
pub type Hand = SmallVec<[CardId; MAX_HAND_SIZE]>;

/// Per-player flags that outlive individual effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerFlags {
    /// The player's once-per-match resurrect has fired.
    pub resurrect_spent: bool,
}

/// One seat in a duel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub(crate) name: String,
    pub(crate) hp: u32,
    pub(crate) atk: i32,
    pub(crate) def: i32,
    pub(crate) hand: Hand,
    /// Top of deck is the front.
    pub(crate) deck: Vector<CardId>,
    pub(crate) discard: Vector<CardId>,
    pub(crate) effects: SmallVec<[ActiveEffect; 4]>,
    pub(crate) flags: PlayerFlags,
}

impl Player {
    /// Create a player with an empty hand and the given (unshuffled) deck.
    #[must_use]
    pub fn new(name: impl Into<String>, hp: u32, deck: impl IntoIterator<Item = CardId>) -> Self {
        Self {
            name: name.into(),
            hp,
            atk: 0,
            def: 0,
            hand: Hand::new(),
            deck: deck.into_iter().collect(),
            discard: Vector::new(),
            effects: SmallVec::new(),
            flags: PlayerFlags::default(),
        }
    }

    /// Set base attack and defense (builder pattern).
    #[must_use]
    pub fn with_stats(mut self, atk: i32, def: i32) -> Self {
        self.atk = atk;
        self.def = def;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn hp(&self) -> u32 {
        self.hp
    }

    #[must_use]
    pub fn atk(&self) -> i32 {
        self.atk
    }

    #[must_use]
    pub fn def(&self) -> i32 {
        self.def
    }

    #[must_use]
    pub fn hand(&self) -> &[CardId] {
        &self.hand
    }

    /// Deck contents, top first.
    #[must_use]
    pub fn deck(&self) -> &Vector<CardId> {
        &self.deck
    }

    #[must_use]
    pub fn discard(&self) -> &Vector<CardId> {
        &self.discard
    }

    #[must_use]
    pub fn effects(&self) -> &[ActiveEffect] {
        &self.effects
    }

    #[must_use]
    pub fn flags(&self) -> PlayerFlags {
        self.flags
    }

    /// Whether the hand is at the cap.
    #[must_use]
    pub fn hand_full(&self) -> bool {
        self.hand.len() >= MAX_HAND_SIZE
    }

    /// Whether any active effect matches `kind`.
    #[must_use]
    pub fn has_effect(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Number of active effects of `kind`.
    #[must_use]
    pub fn count_effect(&self, kind: EffectKind) -> usize {
        self.effects.iter().filter(|e| e.kind == kind).count()
    }

    /// Whether a resurrect is waiting to fire.
    #[must_use]
    pub fn has_pending_resurrect(&self) -> bool {
        self.has_effect(EffectKind::ResurrectPending)
    }

    /// Hp is 0 and nothing will bring the player back.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.hp == 0 && !self.has_pending_resurrect()
    }

    /// Remove and return the oldest effect of `kind`.
    pub(crate) fn take_effect(&mut self, kind: EffectKind) -> Option<ActiveEffect> {
        let pos = self.effects.iter().position(|e| e.kind == kind)?;
        Some(self.effects.remove(pos))
    }

    /// Total number of cards the player owns across hand, deck and discard.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.hand.len() + self.deck.len() + self.discard.len()
    }
}

/// Complete state of one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    /// 1-based; increments once per completed play.
    pub(crate) turn: u32,
    pub(crate) current: PlayerId,
    pub(crate) players: PlayerPair<Player>,
    pub(crate) global_effects: Vector<GlobalEffect>,
    pub(crate) level: LevelId,
    pub(crate) max_hp: Option<u32>,
    pub(crate) phase: Phase,
    pub(crate) result: Option<MatchResult>,
}

impl MatchState {
    /// Create a state at turn 1 with `first` to act and no draw pending.
    #[must_use]
    pub fn new(level: LevelId, players: PlayerPair<Player>, first: PlayerId) -> Self {
        Self {
            turn: 1,
            current: first,
            players,
            global_effects: Vector::new(),
            level,
            max_hp: None,
            phase: Phase::AwaitingPlay,
            result: None,
        }
    }

    /// Set the level-wide modifiers (builder pattern).
    #[must_use]
    pub fn with_global_effects(mut self, globals: impl IntoIterator<Item = GlobalEffect>) -> Self {
        self.global_effects = globals.into_iter().collect();
        self
    }

    /// Clamp heals at `max_hp` (builder pattern).
    #[must_use]
    pub fn with_max_hp(mut self, max_hp: Option<u32>) -> Self {
        self.max_hp = max_hp;
        self
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn current(&self) -> PlayerId {
        self.current
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn level(&self) -> LevelId {
        self.level
    }

    #[must_use]
    pub fn max_hp(&self) -> Option<u32> {
        self.max_hp
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &Player {
        &self.players[player]
    }

    #[must_use]
    pub fn players(&self) -> &PlayerPair<Player> {
        &self.players
    }

    #[must_use]
    pub fn global_effects(&self) -> &Vector<GlobalEffect> {
        &self.global_effects
    }

    /// Outcome, once the match is over.
    #[must_use]
    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    /// Whether the match has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    pub(crate) fn player_mut(&mut self, player: PlayerId) -> &mut Player {
        &mut self.players[player]
    }
}
