//! Static card data: ids, keywords and effect lists.
//!
//! A `Card` is defined once when the catalog is built and never changes
//! afterwards. Decks, hands and discard piles refer to cards by `CardId`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::effects::CardEffect;

/// Catalog key for a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Wrap a raw catalog id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw catalog id.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Classification tag used by interaction rules.
///
/// Miss tables only apply to cards tagged `Damage`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Keyword {
    Damage,
    Heal,
    Buff,
    Debuff,
    Freeze,
    Shield,
    Resurrect,
}

/// Keyword set of a card. Cards rarely carry more than a few.
pub type Keywords = SmallVec<[Keyword; 4]>;

/// Ordered effect list of a card.
pub type EffectList = SmallVec<[CardEffect; 4]>;

/// One card as printed.
///
/// ## Example
///
/// ```
/// use arcane_duels::cards::{Card, CardId, Keyword};
/// use arcane_duels::effects::CardEffect;
///
/// let bolt = Card::new(CardId::new(1), "Arcane Bolt")
///     .with_text("Deal 8 damage.")
///     .with_keyword(Keyword::Damage)
///     .with_effect(CardEffect::Damage(8));
///
/// assert!(bolt.has_keyword(Keyword::Damage));
/// assert_eq!(bolt.base_damage(), 8);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Catalog key.
    pub id: CardId,

    /// Card name (shown in the battle log).
    pub name: String,

    /// Rules text (shown in the battle log).
    #[serde(default)]
    pub text: String,

    /// Interaction tags.
    #[serde(default)]
    pub keywords: Keywords,

    /// Effects, applied in order.
    #[serde(default)]
    pub effects: EffectList,
}

impl Card {
    /// Create a card with no text, keywords or effects.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            text: String::new(),
            keywords: Keywords::new(),
            effects: EffectList::new(),
        }
    }

    /// Set the rules text (builder pattern).
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Add a keyword. Duplicate keywords are ignored.
    #[must_use]
    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        if !self.keywords.contains(&keyword) {
            self.keywords.push(keyword);
        }
        self
    }

    /// Append an effect.
    #[must_use]
    pub fn with_effect(mut self, effect: CardEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Check whether the card carries a keyword.
    #[must_use]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords.contains(&keyword)
    }

    /// Sum of the card's direct `Damage` effects before any modifiers.
    #[must_use]
    pub fn base_damage(&self) -> u32 {
        self.effects
            .iter()
            .map(|effect| match effect {
                CardEffect::Damage(amount) => *amount,
                _ => 0,
            })
            .sum()
    }
}
