//! Unattended matches: both seats driven by decision policies.
//!
//! Used for balancing levels and for benchmarking the engine.

use crate::ai::DecisionPolicy;
use crate::core::{BattleLog, ConfigError, EngineResult, GameRng, LevelConfig, MatchError, MatchState};
use crate::rules::{MatchEngine, Phase};

/// Limits for an unattended match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoplayConfig {
    /// Root seed; decks and picks use separate derived streams.
    pub seed: u64,

    /// Stop after this many plays even if nobody has fallen.
    pub max_turns: u32,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_turns: 500,
        }
    }
}

impl AutoplayConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the play limit.
    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }
}

/// Why an unattended match could not run.
#[derive(Debug, thiserror::Error)]
pub enum AutoplayError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Match(#[from] MatchError),
}

/// Final state and log of an unattended match.
#[derive(Clone, Debug)]
pub struct AutoplayRecord {
    pub state: MatchState,
    pub log: BattleLog,
}

/// Play a match with `policy` choosing for both seats.
///
/// Ends when a seat falls or after `max_turns` plays, whichever is first.
pub fn autoplay<P: DecisionPolicy>(
    engine: &MatchEngine,
    level: &LevelConfig,
    policy: &P,
    config: AutoplayConfig,
) -> Result<AutoplayRecord, AutoplayError> {
    let root = GameRng::new(config.seed);
    let mut shuffle_rng = root.for_context("shuffle");
    let mut ai_rng = root.for_context("ai");

    let mut state = engine.start_match(level, &mut shuffle_rng)?;
    let mut log = BattleLog::new();

    for _ in 0..config.max_turns {
        if MatchEngine::is_terminal(&state) {
            break;
        }
        state = step(engine, &state, policy, &mut shuffle_rng, &mut ai_rng, &mut log)?;
    }

    Ok(AutoplayRecord { state, log })
}

fn step<P: DecisionPolicy>(
    engine: &MatchEngine,
    state: &MatchState,
    policy: &P,
    shuffle_rng: &mut GameRng,
    ai_rng: &mut GameRng,
    log: &mut BattleLog,
) -> EngineResult<MatchState> {
    let current = state.current();
    let ready = if state.phase() == Phase::AwaitingDraw {
        engine.draw(state, shuffle_rng)?
    } else {
        state.clone()
    };
    let index = policy.choose_card_index(ready.player(current).hand(), ai_rng)?;
    let outcome = engine.play(&ready, current, index)?;
    log.push(outcome.entry);
    Ok(outcome.state)
}
