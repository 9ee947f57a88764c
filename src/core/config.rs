//! Level configuration.
//!
//! A host starts a match from a `LevelConfig`:
//! - `SeatConfig`: name, starting stats and deck list for each seat
//! - Opening hand sizes and who moves first
//! - Level-wide modifiers (`GlobalEffect`s) such as miss tables
//!
//! Configs are plain serde data: build them in code with the `with_*`
//! builders, load them from JSON with `LevelConfig::from_json`, or take one of
//! the built-in presets.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::player::{PlayerId, PlayerPair};
use super::state::MAX_HAND_SIZE;
use crate::cards::{catalog, CardCatalog, CardId};
use crate::effects::GlobalEffect;

/// Level identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelId(pub u32);

impl LevelId {
    /// Create a new level ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for LevelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Level {}", self.0)
    }
}

/// Starting setup for one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatConfig {
    pub name: String,
    pub hp: u32,
    #[serde(default)]
    pub atk: i32,
    #[serde(default)]
    pub def: i32,
    /// Deck list, top first when `shuffle_decks` is off.
    pub deck: Vec<CardId>,
}

impl SeatConfig {
    /// Create a seat with zero attack and defense.
    pub fn new(name: impl Into<String>, hp: u32, deck: impl IntoIterator<Item = CardId>) -> Self {
        Self {
            name: name.into(),
            hp,
            atk: 0,
            def: 0,
            deck: deck.into_iter().collect(),
        }
    }

    /// Set starting attack and defense.
    #[must_use]
    pub fn with_stats(mut self, atk: i32, def: i32) -> Self {
        self.atk = atk;
        self.def = def;
        self
    }
}

/// Complete configuration for one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub level: LevelId,

    /// Seat 0 then seat 1.
    pub seats: PlayerPair<SeatConfig>,

    /// Heal ceiling. `None` means heals are unbounded.
    #[serde(default)]
    pub max_hp: Option<u32>,

    /// Cards dealt to each seat before turn 1.
    #[serde(default = "default_starting_hand_size")]
    pub starting_hand_size: usize,

    /// Extra cards for the first mover, who skips the turn 1 draw.
    #[serde(default = "default_first_mover_bonus")]
    pub first_mover_bonus: usize,

    /// Seat that plays turn 1.
    #[serde(default)]
    pub first_mover: PlayerId,

    /// Shuffle decks at match start. Off keeps the listed order.
    #[serde(default = "default_shuffle_decks")]
    pub shuffle_decks: bool,

    /// Level-wide modifiers.
    #[serde(default)]
    pub global_effects: Vec<GlobalEffect>,
}

fn default_starting_hand_size() -> usize {
    4
}

fn default_first_mover_bonus() -> usize {
    1
}

fn default_shuffle_decks() -> bool {
    true
}

impl LevelConfig {
    /// Create a config with default hand sizes and no modifiers.
    pub fn new(level: LevelId, seats: PlayerPair<SeatConfig>) -> Self {
        Self {
            level,
            seats,
            max_hp: None,
            starting_hand_size: default_starting_hand_size(),
            first_mover_bonus: default_first_mover_bonus(),
            first_mover: PlayerId::FIRST,
            shuffle_decks: default_shuffle_decks(),
            global_effects: Vec::new(),
        }
    }

    /// Parse a config from JSON.
    ///
    /// Only checks shape and internal consistency; call `validate` with the
    /// catalog to check card references.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.check_shape()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Built-in level presets, using the standard catalog and deck.
    ///
    /// Returns `None` for levels without a preset.
    #[must_use]
    pub fn preset(level: u32) -> Option<Self> {
        let deck = catalog::standard_deck();
        let (opponent, hp) = match level {
            1 => ("Hedge Witch", 20),
            2 => ("Storm Adept", 25),
            3 => ("Archmage of the Veil", 30),
            _ => return None,
        };

        let player = SeatConfig::new("Apprentice", 20, deck.clone());
        let mut rival = SeatConfig::new(opponent, hp, deck);
        if level >= 2 {
            rival = rival.with_stats(1, 0);
        }

        let mut config = Self::new(LevelId::new(level), PlayerPair::from_values(player, rival));
        if level == 3 {
            // Fog of the Veil: every third turn, damage misses.
            let misses = (1..=30u32).map(|turn| turn % 3 == 0).collect();
            config = config.with_global_effect(GlobalEffect::MissTable { misses });
        }
        Some(config)
    }

    /// Set a heal ceiling.
    #[must_use]
    pub fn with_max_hp(mut self, max_hp: u32) -> Self {
        self.max_hp = Some(max_hp);
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    /// Set the first mover's extra opening cards.
    #[must_use]
    pub fn with_first_mover_bonus(mut self, bonus: usize) -> Self {
        self.first_mover_bonus = bonus;
        self
    }

    /// Set which seat plays turn 1.
    #[must_use]
    pub fn with_first_mover(mut self, player: PlayerId) -> Self {
        self.first_mover = player;
        self
    }

    /// Keep deck lists in their configured order.
    #[must_use]
    pub fn without_shuffle(mut self) -> Self {
        self.shuffle_decks = false;
        self
    }

    /// Add a level-wide modifier.
    #[must_use]
    pub fn with_global_effect(mut self, effect: GlobalEffect) -> Self {
        self.global_effects.push(effect);
        self
    }

    /// Check the config against a catalog.
    pub fn validate(&self, catalog: &CardCatalog) -> Result<(), ConfigError> {
        self.check_shape()?;
        for (player, seat) in self.seats.iter() {
            if let Some(&card) = seat.deck.iter().find(|&&id| !catalog.contains(id)) {
                return Err(ConfigError::UnknownCard { player, card });
            }
        }
        Ok(())
    }

    fn check_shape(&self) -> Result<(), ConfigError> {
        let opening = self.starting_hand_size.saturating_add(self.first_mover_bonus);
        if opening == 0 {
            return Err(ConfigError::EmptyOpeningHand);
        }
        if opening > MAX_HAND_SIZE {
            return Err(ConfigError::HandTooLarge {
                requested: opening,
                cap: MAX_HAND_SIZE,
            });
        }
        // The second mover draws on turn 2, so it must start below the cap.
        if self.starting_hand_size >= MAX_HAND_SIZE {
            return Err(ConfigError::HandTooLarge {
                requested: self.starting_hand_size,
                cap: MAX_HAND_SIZE - 1,
            });
        }
        for (player, seat) in self.seats.iter() {
            if seat.deck.is_empty() {
                return Err(ConfigError::EmptyDeck(player));
            }
            if seat.hp == 0 {
                return Err(ConfigError::NoStartingHp { player, hp: seat.hp });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats() -> PlayerPair<SeatConfig> {
        PlayerPair::from_values(
            SeatConfig::new("A", 20, [CardId::new(1); 6]),
            SeatConfig::new("B", 20, [CardId::new(1); 6]),
        )
    }

    #[test]
    fn test_defaults() {
        let config = LevelConfig::new(LevelId::new(1), seats());

        assert_eq!(config.starting_hand_size, 4);
        assert_eq!(config.first_mover_bonus, 1);
        assert_eq!(config.first_mover, PlayerId::FIRST);
        assert!(config.shuffle_decks);
        assert!(config.max_hp.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = LevelConfig::new(LevelId::new(2), seats())
            .with_max_hp(30)
            .with_starting_hand_size(3)
            .with_first_mover(PlayerId::SECOND)
            .without_shuffle();

        assert_eq!(config.max_hp, Some(30));
        assert_eq!(config.starting_hand_size, 3);
        assert_eq!(config.first_mover, PlayerId::SECOND);
        assert!(!config.shuffle_decks);
    }

    #[test]
    fn test_from_json_applies_defaults() {
        let json = r#"{
            "level": 4,
            "seats": [
                {"name": "A", "hp": 20, "deck": [1, 2, 3]},
                {"name": "B", "hp": 18, "atk": 2, "deck": [1, 1, 1]}
            ],
            "global_effects": [{"miss_table": {"misses": [false, true]}}]
        }"#;

        let config = LevelConfig::from_json(json).unwrap();
        assert_eq!(config.level, LevelId::new(4));
        assert_eq!(config.seats[PlayerId::SECOND].atk, 2);
        assert_eq!(config.seats[PlayerId::SECOND].def, 0);
        assert_eq!(config.starting_hand_size, 4);
        assert_eq!(config.global_effects.len(), 1);
    }

    #[test]
    fn test_from_json_rejects_oversized_hand() {
        let json = r#"{
            "level": 1,
            "seats": [
                {"name": "A", "hp": 20, "deck": [1]},
                {"name": "B", "hp": 20, "deck": [1]}
            ],
            "starting_hand_size": 5
        }"#;

        let err = LevelConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::HandTooLarge { requested: 6, cap: 5 }));
    }

    #[test]
    fn test_from_json_rejects_huge_hand_without_overflow() {
        let json = r#"{
            "level": 1,
            "seats": [
                {"name": "A", "hp": 20, "deck": [1]},
                {"name": "B", "hp": 20, "deck": [1]}
            ],
            "starting_hand_size": 18446744073709551615
        }"#;

        let err = LevelConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::HandTooLarge { cap: 5, .. }));

        let config = LevelConfig::new(LevelId::new(1), seats()).with_first_mover_bonus(usize::MAX);
        assert!(matches!(
            config.validate(&catalog::standard_catalog()),
            Err(ConfigError::HandTooLarge { requested: usize::MAX, cap: 5 })
        ));
    }

    #[test]
    fn test_second_mover_must_be_able_to_draw() {
        let catalog = catalog::standard_catalog();
        let config = LevelConfig::new(LevelId::new(1), seats())
            .with_starting_hand_size(5)
            .with_first_mover_bonus(0);

        assert!(matches!(
            config.validate(&catalog),
            Err(ConfigError::HandTooLarge { requested: 5, cap: 4 })
        ));
    }

    #[test]
    fn test_empty_opening_hand_rejected() {
        let catalog = catalog::standard_catalog();
        let config = LevelConfig::new(LevelId::new(1), seats())
            .with_starting_hand_size(0)
            .with_first_mover_bonus(0);

        assert!(matches!(config.validate(&catalog), Err(ConfigError::EmptyOpeningHand)));
    }

    #[test]
    fn test_from_json_rejects_bad_seat() {
        let json = r#"{
            "level": 1,
            "seats": [
                {"name": "A", "hp": 20, "deck": [1]},
                {"name": "B", "hp": 20, "deck": [1]}
            ],
            "first_mover": 3
        }"#;

        assert!(matches!(LevelConfig::from_json(json), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_catches_unknown_card() {
        let catalog = catalog::standard_catalog();
        let mut config = LevelConfig::new(LevelId::new(1), seats());
        config.seats[PlayerId::SECOND].deck.push(CardId::new(9999));

        let err = config.validate(&catalog).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnknownCard { player, card } if player == PlayerId::SECOND && card == CardId::new(9999)
        ));
    }

    #[test]
    fn test_validate_empty_deck() {
        let catalog = catalog::standard_catalog();
        let mut config = LevelConfig::new(LevelId::new(1), seats());
        config.seats[PlayerId::FIRST].deck.clear();

        assert!(matches!(
            config.validate(&catalog),
            Err(ConfigError::EmptyDeck(p)) if p == PlayerId::FIRST
        ));
    }

    #[test]
    fn test_presets_validate() {
        let catalog = catalog::standard_catalog();
        for level in 1..=3 {
            let config = LevelConfig::preset(level).unwrap();
            config.validate(&catalog).unwrap();
        }
        assert!(LevelConfig::preset(0).is_none());
        assert!(LevelConfig::preset(4).is_none());

        let level3 = LevelConfig::preset(3).unwrap();
        assert!(level3.global_effects[0].misses_on(3));
        assert!(!level3.global_effects[0].misses_on(1));
    }

    #[test]
    fn test_json_round_trip() {
        let config = LevelConfig::preset(3).unwrap();
        let json = config.to_json().unwrap();
        assert_eq!(LevelConfig::from_json(&json).unwrap(), config);
    }
}
