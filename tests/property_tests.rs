//! Property tests over randomly played matches.
//!
//! Matches are driven by proptest-chosen seeds and hand indices; invariants
//! are checked after every single transition.

use std::sync::Arc;

use proptest::prelude::*;

use arcane_duels::cards::{standard_catalog, standard_deck, CardId};
use arcane_duels::core::{
    GameRng, LevelConfig, LevelId, MatchState, PlayerId, PlayerPair, SeatConfig, MAX_HAND_SIZE,
};
use arcane_duels::rules::{MatchEngine, Phase};

fn engine() -> MatchEngine {
    MatchEngine::new(Arc::new(standard_catalog()))
}

fn sorted_cards(state: &MatchState, player: PlayerId) -> Vec<CardId> {
    let p = state.player(player);
    let mut cards: Vec<CardId> = p
        .hand()
        .iter()
        .chain(p.deck().iter())
        .chain(p.discard().iter())
        .copied()
        .collect();
    cards.sort();
    cards
}

fn check_invariants(state: &MatchState) -> Result<(), TestCaseError> {
    for player in PlayerId::both() {
        prop_assert!(state.player(player).hand().len() <= MAX_HAND_SIZE);
    }
    prop_assert!(matches!(
        state.phase(),
        Phase::AwaitingDraw | Phase::AwaitingPlay | Phase::Gameover
    ));
    prop_assert_eq!(state.phase() == Phase::Gameover, state.is_over());
    Ok(())
}

/// Random level built from the standard card set.
fn level_strategy() -> impl Strategy<Value = LevelConfig> {
    (
        1u32..=3,
        prop::collection::vec(prop::sample::select(standard_deck()), 1..20),
        prop::collection::vec(prop::sample::select(standard_deck()), 1..20),
        10u32..40,
        10u32..40,
        any::<bool>(),
    )
        .prop_map(|(level, deck_a, deck_b, hp_a, hp_b, second_first)| {
            let first = if second_first { PlayerId::SECOND } else { PlayerId::FIRST };
            LevelConfig::new(
                LevelId::new(level),
                PlayerPair::from_values(
                    SeatConfig::new("A", hp_a, deck_a),
                    SeatConfig::new("B", hp_b, deck_b),
                ),
            )
            .with_first_mover(first)
        })
}

proptest! {
    #[test]
    fn prop_transitions_keep_invariants(
        level in level_strategy(),
        seed in any::<u64>(),
        picks in prop::collection::vec(0usize..MAX_HAND_SIZE, 1..120),
    ) {
        let engine = engine();
        let mut rng = GameRng::new(seed);
        let mut state = engine.start_match(&level, &mut rng).unwrap();
        check_invariants(&state)?;

        let owned = PlayerPair::new(|p| sorted_cards(&state, p));
        let mut resurrections = PlayerPair::new(|_| 0u32);
        let mut plays = 0usize;

        for pick in picks {
            if MatchEngine::is_terminal(&state) {
                break;
            }
            if state.phase() == Phase::AwaitingDraw {
                state = engine.draw(&state, &mut rng).unwrap();
                check_invariants(&state)?;
            }

            let current = state.current();
            let hand_len = state.player(current).hand().len();
            prop_assert!(hand_len > 0);

            let outcome = engine.play(&state, current, pick % hand_len).unwrap();
            plays += 1;

            prop_assert_eq!(outcome.state.player(current).hand().len(), hand_len - 1);
            prop_assert_eq!(outcome.entry.turn, state.turn());
            for player in PlayerId::both() {
                let before = state.player(player);
                let after = outcome.state.player(player);
                prop_assert!(!before.flags().resurrect_spent || after.flags().resurrect_spent);
                if !before.flags().resurrect_spent && after.flags().resurrect_spent {
                    resurrections[player] += 1;
                }
                prop_assert!(!(after.flags().resurrect_spent && after.has_pending_resurrect()));
                prop_assert_eq!(&sorted_cards(&outcome.state, player), &owned[player]);
            }

            state = outcome.state;
            check_invariants(&state)?;
        }

        for player in PlayerId::both() {
            prop_assert!(resurrections[player] <= 1);
        }
        if !MatchEngine::is_terminal(&state) {
            prop_assert_eq!(state.turn() as usize, plays + 1);
        }
    }

    #[test]
    fn prop_rejected_moves_change_nothing(
        seed in any::<u64>(),
        index in MAX_HAND_SIZE..64usize,
    ) {
        let engine = engine();
        let mut rng = GameRng::new(seed);
        let state = engine.start_match(&LevelConfig::preset(1).unwrap(), &mut rng).unwrap();
        let before = state.clone();

        prop_assert!(engine.play(&state, PlayerId::FIRST, index).is_err());
        prop_assert!(engine.play(&state, PlayerId::SECOND, 0).is_err());
        prop_assert!(engine.draw(&state, &mut rng).is_err());
        prop_assert_eq!(state, before);
    }

    #[test]
    fn prop_same_seed_same_match(seed in any::<u64>(), level in 1u32..=3) {
        let engine = engine();
        let config = LevelConfig::preset(level).unwrap();

        let first = engine.start_match(&config, &mut GameRng::new(seed)).unwrap();
        let second = engine.start_match(&config, &mut GameRng::new(seed)).unwrap();

        prop_assert_eq!(first, second);
    }
}
