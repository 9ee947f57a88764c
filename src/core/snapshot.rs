//! Binary snapshots of a match.
//!
//! A host checkpoints a match by storing `MatchState::to_bytes` together with
//! `GameRng::state`, and resumes it with the matching `from_*` calls. Resumed
//! matches continue exactly as the original would have.

use super::error::SnapshotError;
use super::state::MatchState;

impl MatchState {
    /// Encode the state with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a state produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
