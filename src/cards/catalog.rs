//! Built-in card set used by the level presets.

use super::definition::{Card, CardId, Keyword};
use super::registry::CardCatalog;
use crate::effects::{CardEffect, Pulse};

pub const ARCANE_BOLT: CardId = CardId::new(1);
pub const HEALING_LIGHT: CardId = CardId::new(2);
pub const FROST_LANCE: CardId = CardId::new(3);
pub const ARCANE_BARRIER: CardId = CardId::new(4);
pub const BERSERK: CardId = CardId::new(5);
pub const PHOENIX_FEATHER: CardId = CardId::new(6);
pub const BATTLE_CRY: CardId = CardId::new(7);
pub const WEAKEN: CardId = CardId::new(8);
pub const STONE_SKIN: CardId = CardId::new(9);
pub const SUNDER: CardId = CardId::new(10);
pub const BLOOD_PACT: CardId = CardId::new(11);
pub const REGROWTH: CardId = CardId::new(12);

/// Every built-in card definition.
#[must_use]
pub fn standard_cards() -> Vec<Card> {
    vec![
        Card::new(ARCANE_BOLT, "Arcane Bolt")
            .with_text("Deal 8 damage.")
            .with_keyword(Keyword::Damage)
            .with_effect(CardEffect::Damage(8)),
        Card::new(HEALING_LIGHT, "Healing Light")
            .with_text("Restore 6 health.")
            .with_keyword(Keyword::Heal)
            .with_effect(CardEffect::Heal(6)),
        Card::new(FROST_LANCE, "Frost Lance")
            .with_text("Deal 3 damage. Your opponent's next card loses its damage and healing.")
            .with_keyword(Keyword::Damage)
            .with_keyword(Keyword::Freeze)
            .with_effect(CardEffect::Damage(3))
            .with_effect(CardEffect::Freeze),
        Card::new(ARCANE_BARRIER, "Arcane Barrier")
            .with_text("Absorb the next damage you take.")
            .with_keyword(Keyword::Shield)
            .with_effect(CardEffect::Shield),
        Card::new(BERSERK, "Berserk")
            .with_text("Your next damaging card deals double damage.")
            .with_keyword(Keyword::Buff)
            .with_effect(CardEffect::DoubleDamage),
        Card::new(PHOENIX_FEATHER, "Phoenix Feather")
            .with_text("The next time you would fall, return with 15 health. Once per duel.")
            .with_keyword(Keyword::Resurrect)
            .with_effect(CardEffect::Resurrect),
        Card::new(BATTLE_CRY, "Battle Cry")
            .with_text("Gain 2 attack until the end of your next turn.")
            .with_keyword(Keyword::Buff)
            .with_effect(CardEffect::BuffAtk { amount: 2, turns: 2 }),
        Card::new(WEAKEN, "Weaken")
            .with_text("Your opponent loses 2 attack for their next 2 turns.")
            .with_keyword(Keyword::Debuff)
            .with_effect(CardEffect::DebuffAtk { amount: 2, turns: 2 }),
        Card::new(STONE_SKIN, "Stone Skin")
            .with_text("Gain 2 defense until the end of your next turn.")
            .with_keyword(Keyword::Buff)
            .with_effect(CardEffect::BuffDef { amount: 2, turns: 2 }),
        Card::new(SUNDER, "Sunder")
            .with_text("Your opponent loses 2 defense for their next 2 turns.")
            .with_keyword(Keyword::Debuff)
            .with_effect(CardEffect::DebuffDef { amount: 2, turns: 2 }),
        Card::new(BLOOD_PACT, "Blood Pact")
            .with_text("Deal 10 damage. Lose 4 health.")
            .with_keyword(Keyword::Damage)
            .with_effect(CardEffect::Damage(10))
            .with_effect(CardEffect::SelfDamage(4)),
        Card::new(REGROWTH, "Regrowth")
            .with_text("At the end of this turn and your next 2 turns, restore 2 health.")
            .with_keyword(Keyword::Heal)
            .with_effect(CardEffect::Aura {
                pulse: Pulse::Heal(2),
                turns: 3,
            }),
    ]
}

/// Catalog holding the built-in card set.
#[must_use]
pub fn standard_catalog() -> CardCatalog {
    let mut catalog = CardCatalog::new();
    for card in standard_cards() {
        let registered = catalog.register(card);
        debug_assert!(registered.is_ok(), "built-in card ids are distinct");
    }
    catalog
}

/// Default 20-card deck list.
#[must_use]
pub fn standard_deck() -> Vec<CardId> {
    [
        (ARCANE_BOLT, 4),
        (HEALING_LIGHT, 3),
        (FROST_LANCE, 2),
        (ARCANE_BARRIER, 2),
        (BERSERK, 1),
        (PHOENIX_FEATHER, 1),
        (BATTLE_CRY, 1),
        (WEAKEN, 1),
        (STONE_SKIN, 1),
        (SUNDER, 1),
        (BLOOD_PACT, 2),
        (REGROWTH, 1),
    ]
    .into_iter()
    .flat_map(|(id, copies)| std::iter::repeat(id).take(copies))
    .collect()
}
