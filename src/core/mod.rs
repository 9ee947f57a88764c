//! Core engine types: seats, state, RNG, configuration, log and errors.
//!
//! Everything here is shared by the effect engine, the turn state machine and
//! the session layer. None of it performs I/O.

pub mod player;
pub mod rng;
pub mod config;
pub mod state;
pub mod log;
pub mod error;
mod snapshot;

pub use player::{PlayerId, PlayerPair, SEAT_COUNT};
pub use rng::{GameRng, GameRngState};
pub use config::{LevelConfig, LevelId, SeatConfig};
pub use state::{Hand, MatchState, Player, PlayerFlags, MAX_HAND_SIZE, RESURRECT_HP};
pub use self::log::{BattleLog, LogEntry};
pub use error::{
    ConfigError, EngineResult, InvalidMove, InvalidState, MatchError, SnapshotError,
};
