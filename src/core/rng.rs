//! Seeded randomness for deck shuffles and AI picks.
//!
//! Engine operations never read an ambient random source; callers pass a
//! `&mut GameRng`. A duel derives one stream per purpose from its root seed,
//! so the AI consuming numbers never perturbs the order of a reshuffled deck.
//!
//! ```
//! use arcane_duels::core::GameRng;
//!
//! let root = GameRng::new(42);
//! let mut shuffle = root.for_context("shuffle");
//! let mut replay = GameRng::new(42).for_context("shuffle");
//! assert_eq!(shuffle.gen_index(100), replay.gen_index(100));
//! ```

use std::hash::{Hash, Hasher};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

/// ChaCha8 stream plus the seed it started from.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Stream named `context`, derived from this stream's seed.
    ///
    /// Derivation ignores how far this stream has advanced.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        // FxHasher output is fixed across toolchains, unlike std's SipHash keys.
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Uniform index in `0..len`, or `None` for an empty range.
    pub fn gen_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.inner.gen_range(0..len))
    }

    /// Fisher-Yates over a persistent vector.
    pub fn shuffle_vector<T: Clone>(&mut self, cards: &mut im::Vector<T>) {
        for i in (1..cards.len()).rev() {
            let j = self.inner.gen_range(0..=i);
            cards.swap(i, j);
        }
    }

    /// Position of this stream, for checkpoints.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut rng = Self::new(state.seed);
        rng.inner.set_word_pos(state.word_pos);
        rng
    }
}

/// Seed and ChaCha word offset; restoring costs the same at any offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
}
