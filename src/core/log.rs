//! Battle log: the append-only audit trail of played cards.
//!
//! One `LogEntry` is produced per played card by the state machine. The
//! effect engine itself never writes to the log.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// A played card, as shown to the players.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogEntry {
    /// Turn the card was played on (1-based).
    pub turn: u32,
    pub player_name: String,
    pub card_name: String,
    pub card_text: String,
}

impl LogEntry {
    /// Build the entry for `player_name` playing `card` on `turn`.
    #[must_use]
    pub fn new(turn: u32, player_name: impl Into<String>, card: &Card) -> Self {
        Self {
            turn,
            player_name: player_name.into(),
            card_name: card.name.clone(),
            card_text: card.text.clone(),
        }
    }
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Turn {}: {} used {}", self.turn, self.player_name, self.card_name)
    }
}

/// Append-only sequence of log entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleLog {
    entries: Vector<LogEntry>,
}

impl BattleLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entry.
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push_back(entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Entries recorded on a given turn.
    pub fn for_turn(&self, turn: u32) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.turn == turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    #[test]
    fn test_entry_from_card() {
        let card = Card::new(CardId::new(1), "Arcane Bolt").with_text("Deal 8 damage.");
        let entry = LogEntry::new(3, "Apprentice", &card);

        assert_eq!(entry.turn, 3);
        assert_eq!(entry.card_name, "Arcane Bolt");
        assert_eq!(entry.card_text, "Deal 8 damage.");
        assert_eq!(entry.to_string(), "Turn 3: Apprentice used Arcane Bolt");
    }

    #[test]
    fn test_log_append_only() {
        let card = Card::new(CardId::new(1), "Arcane Bolt");
        let mut log = BattleLog::new();
        assert!(log.is_empty());

        log.push(LogEntry::new(1, "A", &card));
        log.push(LogEntry::new(2, "B", &card));
        log.push(LogEntry::new(2, "B", &card));

        assert_eq!(log.len(), 3);
        assert_eq!(log.last().map(|e| e.player_name.as_str()), Some("B"));
        assert_eq!(log.for_turn(2).count(), 2);
    }
}
