//! Effect resolution - applying a played card to match state.
//!
//! `EffectEngine` is pure: it takes a state and returns a new one. It never
//! writes battle log entries and never draws randomness. The turn state
//! machine wraps it with phase checks, the log and termination.
//!
//! Per card:
//! 1. A pending freeze on the acting player is consumed; the card's damage
//!    and heal numbers are nullified.
//! 2. Damage-keyword cards landing on a miss turn lose their damage.
//! 3. Effects apply in listed order.

use log::{debug, trace};
use smallvec::SmallVec;

use super::effect::{misses_on, ActiveEffect, CardEffect, EffectKind, Lifetime, Pulse};
use crate::cards::{Card, Keyword};
use crate::core::{
    EngineResult, InvalidMove, MatchState, Player, PlayerId, RESURRECT_HP,
};

/// Modifiers decided before a card's effects run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Modifiers {
    pub frozen: bool,
    pub missed: bool,
}

impl Modifiers {
    /// Modifiers `card` would get if `acting` played it now.
    ///
    /// Read-only: the freeze charge is not consumed here.
    pub(crate) fn peek(state: &MatchState, acting: PlayerId, card: &Card) -> Self {
        Self {
            frozen: state.player(acting).has_effect(EffectKind::Freeze),
            missed: card.has_keyword(Keyword::Damage)
                && misses_on(state.global_effects().iter(), state.turn()),
        }
    }
}

/// Applies cards and end-of-turn upkeep.
pub struct EffectEngine;

impl EffectEngine {
    /// Resolve `card` played by `acting`.
    ///
    /// The card must be in the acting player's hand and it must be their
    /// turn. The first copy of the card in hand is moved to the discard pile.
    pub fn apply_card(state: &MatchState, acting: PlayerId, card: &Card) -> EngineResult<MatchState> {
        Self::check_actor(state, acting)?;
        let index = state
            .player(acting)
            .hand()
            .iter()
            .position(|&id| id == card.id)
            .ok_or(InvalidMove::CardNotInHand(card.id))?;

        let mut next = state.clone();
        Self::resolve(&mut next, acting, index, card);
        Ok(next)
    }

    /// Run end-of-turn upkeep for `player`.
    ///
    /// Aura pulses fire, timed effects count down, and expired stat effects
    /// are reverted.
    #[must_use]
    pub fn end_of_turn(state: &MatchState, player: PlayerId) -> MatchState {
        let mut next = state.clone();
        Self::upkeep(&mut next, player);
        next
    }

    pub(crate) fn check_actor(state: &MatchState, acting: PlayerId) -> EngineResult<()> {
        if state.is_over() {
            return Err(InvalidMove::MatchOver.into());
        }
        if acting != state.current() {
            return Err(InvalidMove::NotYourTurn {
                expected: state.current(),
                actual: acting,
            }
            .into());
        }
        Ok(())
    }

    /// Resolve in place. `hand_index` must point at `card` in the acting hand.
    pub(crate) fn resolve(state: &mut MatchState, acting: PlayerId, hand_index: usize, card: &Card) {
        let mods = Modifiers::peek(state, acting, card);
        let cap = state.max_hp();

        {
            let player = state.player_mut(acting);
            if hand_index < player.hand.len() {
                let played = player.hand.remove(hand_index);
                player.discard.push_back(played);
            }
            if mods.frozen {
                player.take_effect(EffectKind::Freeze);
            }
        }

        debug!(
            "turn {}: {} resolves {} (frozen: {}, missed: {})",
            state.turn(),
            acting,
            card.name,
            mods.frozen,
            mods.missed
        );

        // Double-damage and shield are both decided by the card's first landing hit.
        let mut doubled = false;
        let mut struck = false;
        let mut absorbed = false;
        for effect in &card.effects {
            trace!("{} applies {}", card.name, effect.label());
            let (me, opponent) = state.players.split_mut(acting);

            match *effect {
                CardEffect::Damage(base) => {
                    if mods.frozen || mods.missed {
                        trace!("{} nullified", effect.label());
                        continue;
                    }
                    let mut amount = Self::attack_amount(base, me, opponent);
                    if amount == 0 {
                        continue;
                    }
                    if !doubled && me.take_effect(EffectKind::DoubleDamage).is_some() {
                        doubled = true;
                    }
                    if doubled {
                        amount = amount.saturating_mul(2);
                    }
                    if !struck {
                        struck = true;
                        absorbed = opponent.take_effect(EffectKind::Shield).is_some();
                        if absorbed {
                            debug!("{}'s shield absorbs {}", opponent.name, card.name);
                        }
                    }
                    if absorbed {
                        continue;
                    }
                    Self::strike(opponent, amount);
                }
                CardEffect::Heal(amount) => {
                    if mods.frozen {
                        continue;
                    }
                    Self::heal(me, amount, cap);
                }
                CardEffect::SelfDamage(amount) => {
                    if mods.frozen {
                        continue;
                    }
                    Self::strike(me, amount);
                }
                CardEffect::BuffAtk { amount, turns } => {
                    Self::attach_stat(me, EffectKind::BuffAtk, amount, turns);
                }
                CardEffect::BuffDef { amount, turns } => {
                    Self::attach_stat(me, EffectKind::BuffDef, amount, turns);
                }
                CardEffect::DebuffAtk { amount, turns } => {
                    Self::attach_stat(opponent, EffectKind::DebuffAtk, amount, turns);
                }
                CardEffect::DebuffDef { amount, turns } => {
                    Self::attach_stat(opponent, EffectKind::DebuffDef, amount, turns);
                }
                CardEffect::Freeze => {
                    opponent.effects.push(ActiveEffect::one_shot(EffectKind::Freeze));
                }
                CardEffect::Shield => {
                    me.effects.push(ActiveEffect::one_shot(EffectKind::Shield));
                }
                CardEffect::DoubleDamage => {
                    me.effects.push(ActiveEffect::one_shot(EffectKind::DoubleDamage));
                }
                CardEffect::Resurrect => {
                    if me.has_pending_resurrect() || me.flags.resurrect_spent {
                        trace!("{} already has or used a resurrect", me.name);
                    } else {
                        me.effects
                            .push(ActiveEffect::one_shot(EffectKind::ResurrectPending));
                    }
                }
                CardEffect::Aura { pulse, turns } => {
                    me.effects
                        .push(ActiveEffect::timed(EffectKind::Aura(pulse), 0, turns));
                }
            }
        }

        // A resurrect attached after the hit that emptied hp still fires.
        Self::resurrect_fallen(state);
    }

    /// Upkeep in place.
    pub(crate) fn upkeep(state: &mut MatchState, player: PlayerId) {
        let cap = state.max_hp();
        let (me, opponent) = state.players.split_mut(player);

        let held = std::mem::take(&mut me.effects);
        let mut kept: SmallVec<[ActiveEffect; 4]> = SmallVec::new();

        for mut effect in held {
            if let EffectKind::Aura(pulse) = effect.kind {
                match pulse {
                    Pulse::Heal(amount) => Self::heal(me, amount, cap),
                    Pulse::Damage(amount) => Self::deal_damage(opponent, amount),
                }
                trace!("{} aura pulse {:?}", me.name, pulse);
            }

            match effect.lifetime {
                Lifetime::OneShot => kept.push(effect),
                Lifetime::Turns(turns) => {
                    let left = turns.saturating_sub(1);
                    if left == 0 {
                        let (atk, def) = effect.kind.stat_delta(effect.magnitude);
                        me.atk -= atk;
                        me.def -= def;
                        trace!("{} effect {:?} expired", me.name, effect.kind);
                    } else {
                        effect.lifetime = Lifetime::Turns(left);
                        kept.push(effect);
                    }
                }
            }
        }

        // Nothing above attaches effects to `me`, so the old list is replaced whole.
        me.effects = kept;
        Self::resurrect_fallen(state);
    }

    fn attack_amount(base: u32, attacker: &Player, defender: &Player) -> u32 {
        let raw = i64::from(base) + i64::from(attacker.atk) - i64::from(defender.def);
        u32::try_from(raw.max(0)).unwrap_or(u32::MAX)
    }

    fn deal_damage(target: &mut Player, amount: u32) {
        if amount == 0 {
            return;
        }
        if target.take_effect(EffectKind::Shield).is_some() {
            debug!("{}'s shield absorbs {} damage", target.name, amount);
            return;
        }
        Self::strike(target, amount);
    }

    /// Reduce hp with no shield check.
    fn strike(target: &mut Player, amount: u32) {
        target.hp = target.hp.saturating_sub(amount);
        Self::check_resurrect(target);
    }

    fn resurrect_fallen(state: &mut MatchState) {
        for player in PlayerId::both() {
            Self::check_resurrect(state.player_mut(player));
        }
    }

    fn heal(target: &mut Player, amount: u32, cap: Option<u32>) {
        let healed = target.hp.saturating_add(amount);
        target.hp = match cap {
            Some(cap) => healed.min(cap).max(target.hp),
            None => healed,
        };
    }

    fn attach_stat(target: &mut Player, kind: EffectKind, amount: i32, turns: u32) {
        let (atk, def) = kind.stat_delta(amount);
        target.atk += atk;
        target.def += def;
        target.effects.push(ActiveEffect::timed(kind, amount, turns));
    }

    fn check_resurrect(target: &mut Player) {
        if target.hp == 0 && target.take_effect(EffectKind::ResurrectPending).is_some() {
            target.hp = RESURRECT_HP;
            target.flags.resurrect_spent = true;
            debug!("{} resurrects at {} hp", target.name, RESURRECT_HP);
        }
    }
}
