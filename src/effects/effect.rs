//! Effect definitions.
//!
//! Three layers:
//! - `CardEffect`: what a card does when played (static, part of the catalog)
//! - `ActiveEffect`: a status attached to a player after a card applies it
//! - `GlobalEffect`: level-wide modifiers read during resolution

use serde::{Deserialize, Serialize};

/// Periodic payload of an aura, fired at the end of its owner's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pulse {
    /// Heal the aura's owner.
    Heal(u32),
    /// Damage the owner's opponent (shield and resurrect rules apply).
    Damage(u32),
}

/// An atomic effect printed on a card.
///
/// Targets are fixed by variant: damage, debuffs and freeze land on the
/// opponent; everything else lands on the player who played the card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardEffect {
    /// Damage the opponent.
    Damage(u32),
    /// Heal self.
    Heal(u32),
    /// Flat damage to self, ignoring shields and stats.
    SelfDamage(u32),
    /// Raise own attack for `turns` of own turns.
    BuffAtk { amount: i32, turns: u32 },
    /// Raise own defense for `turns` of own turns.
    BuffDef { amount: i32, turns: u32 },
    /// Lower opponent attack for `turns` of their turns.
    DebuffAtk { amount: i32, turns: u32 },
    /// Lower opponent defense for `turns` of their turns.
    DebuffDef { amount: i32, turns: u32 },
    /// Opponent's next card loses its damage and heal.
    Freeze,
    /// Absorb the next damaging hit on self.
    Shield,
    /// Double the damage of own next damaging card.
    DoubleDamage,
    /// Return at 15 hp the next time hp reaches 0. Once per match.
    Resurrect,
    /// Attach a repeating pulse to self for `turns` of own turns.
    Aura { pulse: Pulse, turns: u32 },
}

impl CardEffect {
    /// Numeric effects nullified by freeze.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Damage(_) | Self::Heal(_) | Self::SelfDamage(_))
    }

    /// Short name used in trace logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Damage(_) => "damage",
            Self::Heal(_) => "heal",
            Self::SelfDamage(_) => "self_damage",
            Self::BuffAtk { .. } => "buff_atk",
            Self::BuffDef { .. } => "buff_def",
            Self::DebuffAtk { .. } => "debuff_atk",
            Self::DebuffDef { .. } => "debuff_def",
            Self::Freeze => "freeze",
            Self::Shield => "shield",
            Self::DoubleDamage => "double_damage",
            Self::Resurrect => "resurrect",
            Self::Aura { .. } => "aura",
        }
    }
}

/// Kind of status attached to a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Freeze,
    Shield,
    DoubleDamage,
    ResurrectPending,
    BuffAtk,
    BuffDef,
    DebuffAtk,
    DebuffDef,
    Aura(Pulse),
}

impl EffectKind {
    /// Attack/defense change applied while the effect is active.
    ///
    /// Returns `(atk_delta, def_delta)` for a given magnitude.
    #[must_use]
    pub fn stat_delta(self, magnitude: i32) -> (i32, i32) {
        match self {
            Self::BuffAtk => (magnitude, 0),
            Self::BuffDef => (0, magnitude),
            Self::DebuffAtk => (-magnitude, 0),
            Self::DebuffDef => (0, -magnitude),
            _ => (0, 0),
        }
    }
}

/// How long an active effect lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifetime {
    /// Removed when its trigger fires.
    OneShot,
    /// Counts down at the end of each of its holder's turns.
    Turns(u32),
}

/// A status effect held by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: EffectKind,
    pub lifetime: Lifetime,
    pub magnitude: i32,
}

impl ActiveEffect {
    /// A trigger-consumed effect with no magnitude.
    #[must_use]
    pub const fn one_shot(kind: EffectKind) -> Self {
        Self {
            kind,
            lifetime: Lifetime::OneShot,
            magnitude: 0,
        }
    }

    /// A timed effect.
    #[must_use]
    pub const fn timed(kind: EffectKind, magnitude: i32, turns: u32) -> Self {
        Self {
            kind,
            lifetime: Lifetime::Turns(turns),
            magnitude,
        }
    }
}

/// Level-scoped modifier affecting both players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalEffect {
    /// Damage-keyword cards miss on turns marked `true`.
    ///
    /// Indexed by `turn - 1`; turns past the end never miss.
    MissTable { misses: Vec<bool> },
}

impl GlobalEffect {
    /// Whether this modifier makes damage miss on `turn` (1-based).
    #[must_use]
    pub fn misses_on(&self, turn: u32) -> bool {
        match self {
            Self::MissTable { misses } => turn
                .checked_sub(1)
                .and_then(|i| misses.get(i as usize))
                .copied()
                .unwrap_or(false),
        }
    }
}

/// Check a list of global effects for a miss on `turn`.
#[must_use]
pub fn misses_on<'a>(globals: impl IntoIterator<Item = &'a GlobalEffect>, turn: u32) -> bool {
    globals.into_iter().any(|g| g.misses_on(turn))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_effects() {
        assert!(CardEffect::Damage(3).is_numeric());
        assert!(CardEffect::Heal(3).is_numeric());
        assert!(CardEffect::SelfDamage(1).is_numeric());
        assert!(!CardEffect::Shield.is_numeric());
        assert!(!CardEffect::Aura { pulse: Pulse::Heal(2), turns: 3 }.is_numeric());
    }

    #[test]
    fn test_stat_delta() {
        assert_eq!(EffectKind::BuffAtk.stat_delta(2), (2, 0));
        assert_eq!(EffectKind::DebuffDef.stat_delta(3), (0, -3));
        assert_eq!(EffectKind::Shield.stat_delta(5), (0, 0));
    }

    #[test]
    fn test_miss_table_indexing() {
        let table = GlobalEffect::MissTable {
            misses: vec![false, true, false],
        };

        assert!(!table.misses_on(0));
        assert!(!table.misses_on(1));
        assert!(table.misses_on(2));
        assert!(!table.misses_on(3));
        assert!(!table.misses_on(40));

        let globals = vec![table];
        assert!(misses_on(&globals, 2));
        assert!(!misses_on(&globals, 3));
        assert!(!misses_on(&Vec::<GlobalEffect>::new(), 2));
    }

    #[test]
    fn test_effect_serialization() {
        let effect = CardEffect::BuffAtk { amount: 2, turns: 2 };
        let json = serde_json::to_string(&effect).unwrap();
        assert_eq!(json, r#"{"buff_atk":{"amount":2,"turns":2}}"#);

        let freeze: CardEffect = serde_json::from_str(r#""freeze""#).unwrap();
        assert_eq!(freeze, CardEffect::Freeze);
    }
}
