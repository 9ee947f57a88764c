//! A running duel between a human seat and an AI seat.
//!
//! `Duel` is the state container a presentation layer holds on to. It owns
//! the current `MatchState`, the battle log and both RNG streams, and turns
//! player intents into engine calls. Each call takes `&mut self`, so
//! transitions are serialized; a threaded host wraps one `Duel` in a `Mutex`.

use log::{debug, warn};

use crate::ai::DecisionPolicy;
use crate::core::{
    BattleLog, ConfigError, EngineResult, GameRng, GameRngState, InvalidMove, LevelConfig,
    LogEntry, MatchState, PlayerId,
};
use crate::rules::{MatchEngine, MatchResult, Phase, PlayCue, PlayOutcome};
use crate::settlement::{
    DeckRecord, MatchId, Settlement, SettlementError, SettlementOutcome, SettlementRequest,
};

/// Who acts next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnOwner {
    Human,
    Ai,
}

/// What a front end needs to show one play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayReport {
    pub player: PlayerId,
    pub entry: LogEntry,
    pub cue: PlayCue,
    /// Set when this play ended the match.
    pub result: Option<MatchResult>,
}

/// Seeds and seats for a new duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DuelSetup {
    pub match_id: MatchId,
    pub human: PlayerId,
    /// Root seed; shuffles and AI picks use separate streams derived from it.
    pub seed: u64,
}

impl DuelSetup {
    #[must_use]
    pub fn new(match_id: MatchId, seed: u64) -> Self {
        Self {
            match_id,
            human: PlayerId::FIRST,
            seed,
        }
    }

    /// Seat the human in `seat` (builder pattern).
    #[must_use]
    pub fn with_human(mut self, seat: PlayerId) -> Self {
        self.human = seat;
        self
    }
}

/// Session driver for one match.
pub struct Duel<S: Settlement, P: DecisionPolicy> {
    engine: MatchEngine,
    state: MatchState,
    log: BattleLog,
    shuffle_rng: GameRng,
    ai_rng: GameRng,
    human: PlayerId,
    match_id: MatchId,
    settlement: S,
    policy: P,
    settled: bool,
    settlement_error: Option<SettlementError>,
    deck_record_error: Option<SettlementError>,
}

impl<S: Settlement, P: DecisionPolicy> Duel<S, P> {
    /// Deal a new match.
    pub fn start(
        engine: MatchEngine,
        config: &LevelConfig,
        setup: DuelSetup,
        mut settlement: S,
        policy: P,
    ) -> Result<Self, ConfigError> {
        let root = GameRng::new(setup.seed);
        let mut shuffle_rng = root.for_context("shuffle");
        let ai_rng = root.for_context("ai");
        let state = engine.start_match(config, &mut shuffle_rng)?;

        debug!("{} starts with the human in seat {}", setup.match_id, setup.human.index());

        let dealt = state.player(setup.human);
        let record = DeckRecord {
            match_id: setup.match_id,
            seed: setup.seed,
            cards: dealt.hand().iter().chain(dealt.deck().iter()).copied().collect(),
        };
        let deck_record_error = settlement.record_deck(record).err();
        if let Some(error) = &deck_record_error {
            warn!("deck record for {} failed: {}", setup.match_id, error);
        }

        Ok(Self {
            engine,
            state,
            log: BattleLog::new(),
            shuffle_rng,
            ai_rng,
            human: setup.human,
            match_id: setup.match_id,
            settlement,
            policy,
            settled: false,
            settlement_error: None,
            deck_record_error,
        })
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[must_use]
    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    #[must_use]
    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    #[must_use]
    pub fn match_id(&self) -> MatchId {
        self.match_id
    }

    #[must_use]
    pub fn human(&self) -> PlayerId {
        self.human
    }

    #[must_use]
    pub fn ai(&self) -> PlayerId {
        self.human.opponent()
    }

    #[must_use]
    pub fn settlement(&self) -> &S {
        &self.settlement
    }

    /// Whether settlement has been attempted.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// The settlement failure, if the one attempt failed.
    #[must_use]
    pub fn settlement_error(&self) -> Option<&SettlementError> {
        self.settlement_error.as_ref()
    }

    /// The deck record failure from match start, if any.
    #[must_use]
    pub fn deck_record_error(&self) -> Option<&SettlementError> {
        self.deck_record_error.as_ref()
    }

    /// Seat to act, or `None` once the match is over.
    #[must_use]
    pub fn turn_owner(&self) -> Option<TurnOwner> {
        if self.state.is_over() {
            None
        } else if self.state.current() == self.human {
            Some(TurnOwner::Human)
        } else {
            Some(TurnOwner::Ai)
        }
    }

    /// RNG positions, for checkpointing alongside `MatchState::to_bytes`.
    #[must_use]
    pub fn rng_states(&self) -> (GameRngState, GameRngState) {
        (self.shuffle_rng.state(), self.ai_rng.state())
    }

    /// Draw for the human seat.
    pub fn draw(&mut self) -> EngineResult<()> {
        self.expect_turn(self.human)?;
        self.state = self.engine.draw(&self.state, &mut self.shuffle_rng)?;
        Ok(())
    }

    /// Play the human's card at `hand_index`.
    pub fn play_human(&mut self, hand_index: usize) -> EngineResult<PlayReport> {
        self.expect_turn(self.human)?;
        let outcome = self.engine.play(&self.state, self.human, hand_index)?;
        Ok(self.commit(self.human, outcome))
    }

    /// Take the AI's whole turn: draw if needed, then play a card.
    pub fn run_ai_turn(&mut self) -> EngineResult<PlayReport> {
        let ai = self.ai();
        self.expect_turn(ai)?;

        // Draw and choice happen on a working copy; nothing commits unless the play does.
        let mut working = self.state.clone();
        let mut shuffle_rng = self.shuffle_rng.clone();
        let mut ai_rng = self.ai_rng.clone();
        if working.phase() == Phase::AwaitingDraw {
            working = self.engine.draw(&working, &mut shuffle_rng)?;
        }
        let index = self
            .policy
            .choose_card_index(working.player(ai).hand(), &mut ai_rng)?;
        let outcome = self.engine.play(&working, ai, index)?;

        self.shuffle_rng = shuffle_rng;
        self.ai_rng = ai_rng;
        Ok(self.commit(ai, outcome))
    }

    fn expect_turn(&self, player: PlayerId) -> EngineResult<()> {
        if self.state.is_over() {
            return Err(InvalidMove::MatchOver.into());
        }
        if self.state.current() != player {
            return Err(InvalidMove::NotYourTurn {
                expected: self.state.current(),
                actual: player,
            }
            .into());
        }
        Ok(())
    }

    fn commit(&mut self, player: PlayerId, outcome: PlayOutcome) -> PlayReport {
        let PlayOutcome { state, entry, cue } = outcome;
        self.state = state;
        self.log.push(entry.clone());

        let result = MatchEngine::result(&self.state);
        if let Some(result) = result {
            self.settle_once(result);
        }

        PlayReport {
            player,
            entry,
            cue,
            result,
        }
    }

    fn settle_once(&mut self, result: MatchResult) {
        if self.settled {
            return;
        }
        self.settled = true;

        let outcome = match result {
            MatchResult::Winner(winner) if winner == self.human => {
                SettlementOutcome::RecordWin { winner }
            }
            MatchResult::Winner(_) => SettlementOutcome::Concede,
            MatchResult::Draw => {
                debug!("{} ended in a draw; nothing to settle", self.match_id);
                return;
            }
        };

        let request = SettlementRequest {
            match_id: self.match_id,
            outcome,
        };
        if let Err(error) = self.settlement.settle(request) {
            warn!("settlement of {} failed: {}", self.match_id, error);
            self.settlement_error = Some(error);
        }
    }
}
