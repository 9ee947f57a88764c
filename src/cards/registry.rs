//! Card catalog for definition lookup.
//!
//! The `CardCatalog` stores every card definition a match can reference. It
//! is built once, then shared read-only (usually behind an `Arc`).

use rustc_hash::FxHashMap;

use super::definition::{Card, CardId, Keyword};
use crate::core::{EngineResult, InvalidState};

/// Catalog of card definitions.
///
/// ## Example
///
/// ```
/// use arcane_duels::cards::{Card, CardCatalog, CardId};
/// use arcane_duels::effects::CardEffect;
///
/// let mut catalog = CardCatalog::new();
/// catalog
///     .register(Card::new(CardId::new(1), "Arcane Bolt").with_effect(CardEffect::Damage(8)))
///     .unwrap();
///
/// let found = catalog.get(CardId::new(1)).unwrap();
/// assert_eq!(found.name, "Arcane Bolt");
/// assert!(catalog.register(Card::new(CardId::new(1), "Copy")).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, Card>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a list of cards, rejecting duplicate ids.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> EngineResult<Self> {
        let mut catalog = Self::new();
        for card in cards {
            catalog.register(card)?;
        }
        Ok(catalog)
    }

    /// Add `card`; ids must be unique.
    ///
    /// Fails if a card with the same ID already exists; the catalog is left
    /// unchanged.
    pub fn register(&mut self, card: Card) -> EngineResult<()> {
        if self.cards.contains_key(&card.id) {
            return Err(InvalidState::DuplicateCard(card.id).into());
        }
        self.cards.insert(card.id, card);
        Ok(())
    }

    /// Look up `id`.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Like `get`, but a missing id is an `UnknownCard` error.
    pub fn card(&self, id: CardId) -> EngineResult<&Card> {
        self.cards
            .get(&id)
            .ok_or_else(|| InvalidState::UnknownCard(id).into())
    }

    /// Whether `id` is in the catalog.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Find cards carrying a keyword.
    pub fn find_by_keyword(&self, keyword: Keyword) -> impl Iterator<Item = &Card> {
        self.cards.values().filter(move |c| c.has_keyword(keyword))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MatchError;

    #[test]
    fn test_register_and_lookup() {
        let mut catalog = CardCatalog::new();
        catalog.register(Card::new(CardId::new(1), "Test Card")).unwrap();

        assert_eq!(catalog.get(CardId::new(1)).map(|c| c.name.as_str()), Some("Test Card"));
        assert!(catalog.get(CardId::new(99)).is_none());
        assert!(catalog.contains(CardId::new(1)));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut catalog = CardCatalog::new();
        catalog.register(Card::new(CardId::new(1), "Card A")).unwrap();

        let err = catalog.register(Card::new(CardId::new(1), "Card B")).unwrap_err();
        assert_eq!(err, MatchError::InvalidState(InvalidState::DuplicateCard(CardId::new(1))));
        assert_eq!(catalog.get(CardId::new(1)).unwrap().name, "Card A");
    }

    #[test]
    fn test_card_lookup_error() {
        let catalog = CardCatalog::new();
        assert_eq!(
            catalog.card(CardId::new(7)).unwrap_err(),
            MatchError::InvalidState(InvalidState::UnknownCard(CardId::new(7)))
        );
    }

    #[test]
    fn test_find_by_keyword() {
        let catalog = CardCatalog::from_cards([
            Card::new(CardId::new(1), "Bolt").with_keyword(Keyword::Damage),
            Card::new(CardId::new(2), "Mend").with_keyword(Keyword::Heal),
            Card::new(CardId::new(3), "Lance")
                .with_keyword(Keyword::Damage)
                .with_keyword(Keyword::Freeze),
        ])
        .unwrap();

        assert_eq!(catalog.find_by_keyword(Keyword::Damage).count(), 2);
        assert_eq!(catalog.find_by_keyword(Keyword::Shield).count(), 0);
    }
}
