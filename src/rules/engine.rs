//! Turn state machine.
//!
//! `MatchEngine` owns the rules of the duel:
//! - Dealing decks and opening hands from a level config
//! - The draw step, with reshuffle from discard
//! - Playing a card, end-of-turn upkeep and defeat detection
//!
//! Every operation takes `&MatchState` and returns a fresh state. A rejected
//! operation returns an error and the caller keeps the old state, so no
//! half-applied transition is ever visible.

use std::sync::Arc;

use log::debug;

use super::phase::{MatchResult, Phase};
use crate::cards::{Card, CardCatalog, CardId};
use crate::core::{
    ConfigError, EngineResult, GameRng, InvalidMove, LevelConfig, LogEntry, MatchState, Player,
    PlayerId, PlayerPair,
};
use crate::effects::{EffectEngine, Modifiers};

/// Audio/visual cue for a played card, chosen before it resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayCue {
    /// The acting player was frozen; the card thaws them instead.
    Defrost,
    /// A damage card landed on a miss turn.
    Miss,
    /// Regular play of the given card.
    Card(CardId),
}

/// Result of a successful play.
#[derive(Clone, Debug)]
pub struct PlayOutcome {
    /// State after resolution, upkeep and turn passing.
    pub state: MatchState,
    /// Battle log entry for the played card.
    pub entry: LogEntry,
    pub cue: PlayCue,
}

/// Rules engine for a duel.
///
/// Holds the card catalog; cheap to clone.
#[derive(Clone, Debug)]
pub struct MatchEngine {
    catalog: Arc<CardCatalog>,
}

impl MatchEngine {
    /// Create an engine over a catalog.
    #[must_use]
    pub fn new(catalog: Arc<CardCatalog>) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    /// Deal a new match.
    ///
    /// Decks are shuffled with `rng` unless the level turns shuffling off.
    /// Each seat gets the opening hand, the first mover gets the bonus cards,
    /// and the match starts on turn 1 with the first mover to play.
    pub fn start_match(&self, config: &LevelConfig, rng: &mut GameRng) -> Result<MatchState, ConfigError> {
        config.validate(&self.catalog)?;

        let players = PlayerPair::new(|seat| {
            let setup = &config.seats[seat];
            let mut player = Player::new(setup.name.clone(), setup.hp, setup.deck.iter().copied())
                .with_stats(setup.atk, setup.def);
            if config.shuffle_decks {
                rng.shuffle_vector(&mut player.deck);
            }

            let mut opening = config.starting_hand_size;
            if seat == config.first_mover {
                opening += config.first_mover_bonus;
            }
            for _ in 0..opening {
                match player.deck.pop_front() {
                    Some(card) => player.hand.push(card),
                    None => break,
                }
            }
            player
        });

        debug!(
            "{} starts: {} vs {}, {} moves first",
            config.level,
            players[PlayerId::FIRST].name(),
            players[PlayerId::SECOND].name(),
            config.first_mover
        );

        Ok(MatchState::new(config.level, players, config.first_mover)
            .with_global_effects(config.global_effects.iter().cloned())
            .with_max_hp(config.max_hp))
    }

    /// Draw one card for the current player.
    ///
    /// An empty deck is refilled by shuffling the discard pile. If both are
    /// empty nothing is drawn but the phase still advances.
    pub fn draw(&self, state: &MatchState, rng: &mut GameRng) -> EngineResult<MatchState> {
        if state.is_over() {
            return Err(InvalidMove::MatchOver.into());
        }
        Self::expect_phase(state, Phase::AwaitingDraw)?;
        let current = state.current();
        if state.player(current).hand_full() {
            return Err(InvalidMove::HandFull.into());
        }

        let mut next = state.clone();
        let player = next.player_mut(current);
        if player.deck.is_empty() && !player.discard.is_empty() {
            player.deck = std::mem::take(&mut player.discard);
            rng.shuffle_vector(&mut player.deck);
            debug!("{} reshuffles {} cards", player.name, player.deck.len());
        }
        if let Some(card) = player.deck.pop_front() {
            player.hand.push(card);
        }

        next.phase = Phase::AwaitingPlay;
        Ok(next)
    }

    /// Card at `hand_index` of the current player and its cue, without playing it.
    pub fn preview(&self, state: &MatchState, player: PlayerId, hand_index: usize) -> EngineResult<PlayCue> {
        let card_id = self.validate_play(state, player, hand_index)?;
        let card = self.catalog.card(card_id)?;
        Ok(Self::cue(state, player, card))
    }

    /// Play the card at `hand_index` for `player`.
    ///
    /// Resolves the card, runs the player's end-of-turn upkeep and checks for
    /// defeat. If the match goes on, the turn passes and the opponent must
    /// draw.
    pub fn play(&self, state: &MatchState, player: PlayerId, hand_index: usize) -> EngineResult<PlayOutcome> {
        let card_id = self.validate_play(state, player, hand_index)?;
        let card = self.catalog.card(card_id)?;

        let cue = Self::cue(state, player, card);
        let entry = LogEntry::new(state.turn(), state.player(player).name(), card);

        let mut next = state.clone();
        next.phase = Phase::Resolving;
        loop {
            match next.phase {
                Phase::Resolving => {
                    EffectEngine::resolve(&mut next, player, hand_index, card);
                    EffectEngine::upkeep(&mut next, player);
                    next.phase = match Self::evaluate(&next) {
                        Some(result) => {
                            debug!("match over on turn {}: {:?}", next.turn, result);
                            next.result = Some(result);
                            Phase::Gameover
                        }
                        None => Phase::AwaitingOpponent,
                    };
                }
                Phase::AwaitingOpponent => {
                    next.current = player.opponent();
                    next.turn += 1;
                    next.phase = Phase::AwaitingDraw;
                }
                Phase::AwaitingDraw | Phase::AwaitingPlay | Phase::Gameover => break,
            }
        }

        Ok(PlayOutcome { state: next, entry, cue })
    }

    /// Whether the match has ended.
    #[must_use]
    pub fn is_terminal(state: &MatchState) -> bool {
        state.is_over()
    }

    /// Winning seat. `None` while the match runs and on a draw.
    #[must_use]
    pub fn winner(state: &MatchState) -> Option<PlayerId> {
        state.result().and_then(|r| r.winner())
    }

    /// Outcome, once the match is over.
    #[must_use]
    pub fn result(state: &MatchState) -> Option<MatchResult> {
        state.result().copied()
    }

    fn validate_play(&self, state: &MatchState, player: PlayerId, hand_index: usize) -> EngineResult<CardId> {
        EffectEngine::check_actor(state, player)?;
        Self::expect_phase(state, Phase::AwaitingPlay)?;
        let hand = state.player(player).hand();
        hand.get(hand_index).copied().ok_or_else(|| {
            InvalidMove::HandIndexOutOfRange {
                index: hand_index,
                len: hand.len(),
            }
            .into()
        })
    }

    fn expect_phase(state: &MatchState, expected: Phase) -> EngineResult<()> {
        if state.phase() != expected {
            return Err(InvalidMove::WrongPhase {
                expected,
                actual: state.phase(),
            }
            .into());
        }
        Ok(())
    }

    fn cue(state: &MatchState, player: PlayerId, card: &Card) -> PlayCue {
        let mods = Modifiers::peek(state, player, card);
        if mods.frozen {
            PlayCue::Defrost
        } else if mods.missed {
            PlayCue::Miss
        } else {
            PlayCue::Card(card.id)
        }
    }

    fn evaluate(state: &MatchState) -> Option<MatchResult> {
        let first = state.player(PlayerId::FIRST).is_defeated();
        let second = state.player(PlayerId::SECOND).is_defeated();
        match (first, second) {
            (true, true) => Some(MatchResult::Draw),
            (true, false) => Some(MatchResult::Winner(PlayerId::SECOND)),
            (false, true) => Some(MatchResult::Winner(PlayerId::FIRST)),
            (false, false) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{catalog, standard_catalog};
    use crate::core::{LevelId, MatchError, SeatConfig, MAX_HAND_SIZE};

    fn engine() -> MatchEngine {
        MatchEngine::new(Arc::new(standard_catalog()))
    }

    fn bolts_config() -> LevelConfig {
        let deck = vec![catalog::ARCANE_BOLT; 8];
        LevelConfig::new(
            LevelId::new(1),
            PlayerPair::from_values(
                SeatConfig::new("Apprentice", 20, deck.clone()),
                SeatConfig::new("Hedge Witch", 20, deck),
            ),
        )
        .without_shuffle()
    }

    #[test]
    fn test_start_match_deals_opening_hands() {
        let engine = engine();
        let state = engine.start_match(&bolts_config(), &mut GameRng::new(1)).unwrap();

        assert_eq!(state.turn(), 1);
        assert_eq!(state.phase(), Phase::AwaitingPlay);
        assert_eq!(state.current(), PlayerId::FIRST);
        assert_eq!(state.player(PlayerId::FIRST).hand().len(), 5);
        assert_eq!(state.player(PlayerId::SECOND).hand().len(), 4);
        assert_eq!(state.player(PlayerId::SECOND).deck().len(), 4);
    }

    #[test]
    fn test_start_match_rejects_invalid_config() {
        let engine = engine();
        let mut config = bolts_config();
        config.seats[PlayerId::SECOND].deck = vec![CardId::new(404)];

        assert!(matches!(
            engine.start_match(&config, &mut GameRng::new(1)),
            Err(ConfigError::UnknownCard { .. })
        ));
    }

    #[test]
    fn test_play_passes_turn() {
        let engine = engine();
        let state = engine.start_match(&bolts_config(), &mut GameRng::new(1)).unwrap();

        let outcome = engine.play(&state, PlayerId::FIRST, 0).unwrap();

        assert_eq!(outcome.state.player(PlayerId::SECOND).hp(), 12);
        assert_eq!(outcome.state.turn(), 2);
        assert_eq!(outcome.state.current(), PlayerId::SECOND);
        assert_eq!(outcome.state.phase(), Phase::AwaitingDraw);
        assert_eq!(outcome.entry.turn, 1);
        assert_eq!(outcome.entry.card_name, "Arcane Bolt");
        assert_eq!(outcome.cue, PlayCue::Card(catalog::ARCANE_BOLT));
    }

    #[test]
    fn test_phase_is_enforced() {
        let engine = engine();
        let mut rng = GameRng::new(1);
        let state = engine.start_match(&bolts_config(), &mut rng).unwrap();

        assert_eq!(
            engine.draw(&state, &mut rng).unwrap_err(),
            MatchError::InvalidMove(InvalidMove::WrongPhase {
                expected: Phase::AwaitingDraw,
                actual: Phase::AwaitingPlay,
            })
        );

        let after = engine.play(&state, PlayerId::FIRST, 0).unwrap().state;
        assert!(matches!(
            engine.play(&after, PlayerId::SECOND, 0),
            Err(MatchError::InvalidMove(InvalidMove::WrongPhase { .. }))
        ));
    }

    #[test]
    fn test_draw_rejects_full_hand() {
        let engine = engine();
        let mut rng = GameRng::new(1);
        let mut state = engine.start_match(&bolts_config(), &mut rng).unwrap();
        state.phase = Phase::AwaitingDraw;

        assert_eq!(state.player(PlayerId::FIRST).hand().len(), MAX_HAND_SIZE);
        assert_eq!(
            engine.draw(&state, &mut rng).unwrap_err(),
            MatchError::InvalidMove(InvalidMove::HandFull)
        );
    }

    #[test]
    fn test_draw_reshuffles_discard() {
        let engine = engine();
        let mut rng = GameRng::new(1);
        let mut state = engine.start_match(&bolts_config(), &mut rng).unwrap();
        state.phase = Phase::AwaitingDraw;
        state.current = PlayerId::SECOND;
        {
            let player = state.player_mut(PlayerId::SECOND);
            let moved = std::mem::take(&mut player.deck);
            player.discard = moved;
        }

        let next = engine.draw(&state, &mut rng).unwrap();
        let player = next.player(PlayerId::SECOND);

        assert_eq!(player.hand().len(), 5);
        assert!(player.discard().is_empty());
        assert_eq!(player.deck().len(), 3);
        assert_eq!(next.phase(), Phase::AwaitingPlay);
    }

    #[test]
    fn test_draw_with_nothing_left_still_advances() {
        let engine = engine();
        let mut rng = GameRng::new(1);
        let mut state = engine.start_match(&bolts_config(), &mut rng).unwrap();
        state.phase = Phase::AwaitingDraw;
        state.current = PlayerId::SECOND;
        state.player_mut(PlayerId::SECOND).deck.clear();

        let next = engine.draw(&state, &mut rng).unwrap();
        assert_eq!(next.player(PlayerId::SECOND).hand().len(), 4);
        assert_eq!(next.phase(), Phase::AwaitingPlay);
    }

    #[test]
    fn test_lethal_play_ends_match() {
        let engine = engine();
        let mut state = engine.start_match(&bolts_config(), &mut GameRng::new(1)).unwrap();
        state.player_mut(PlayerId::SECOND).hp = 8;

        let outcome = engine.play(&state, PlayerId::FIRST, 0).unwrap();

        assert!(MatchEngine::is_terminal(&outcome.state));
        assert_eq!(MatchEngine::winner(&outcome.state), Some(PlayerId::FIRST));
        assert_eq!(outcome.state.phase(), Phase::Gameover);
        assert_eq!(outcome.state.turn(), 1);
        assert_eq!(
            engine.play(&outcome.state, PlayerId::FIRST, 0).unwrap_err(),
            MatchError::InvalidMove(InvalidMove::MatchOver)
        );
    }

    #[test]
    fn test_preview_matches_play_cue() {
        let engine = engine();
        let mut state = engine.start_match(&bolts_config(), &mut GameRng::new(1)).unwrap();
        state.global_effects.push_back(crate::effects::GlobalEffect::MissTable { misses: vec![true] });

        let cue = engine.preview(&state, PlayerId::FIRST, 0).unwrap();
        let outcome = engine.play(&state, PlayerId::FIRST, 0).unwrap();

        assert_eq!(cue, PlayCue::Miss);
        assert_eq!(outcome.cue, PlayCue::Miss);
        assert_eq!(outcome.state.player(PlayerId::SECOND).hp(), 20);
    }
}
