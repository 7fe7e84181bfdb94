//! Seeded randomness for shuffling and cutting decks.
//!
//! A deal is reproducible from its seed. A [`DealCheckpoint`] pins the
//! generator at one point of its stream, so a single shuffle can be replayed
//! later without re-running everything dealt before it.
//!
//! ```
//! use card_table::core::DealRng;
//!
//! let mut table_rng = DealRng::new(42);
//! let mut replay_rng = DealRng::new(42);
//!
//! let mut left = vec!["SA", "S2", "S3", "S4", "S5"];
//! let mut right = left.clone();
//! table_rng.shuffle(&mut left);
//! replay_rng.shuffle(&mut right);
//!
//! assert_eq!(left, right);
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic generator behind every shuffle and cut.
#[derive(Clone, Debug)]
pub struct DealRng {
    stream: ChaCha8Rng,
    seed: u64,
}

impl DealRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            stream: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Resume a generator exactly where a checkpoint was taken.
    #[must_use]
    pub fn resume(checkpoint: &DealCheckpoint) -> Self {
        let mut rng = Self::new(checkpoint.seed);
        rng.stream.set_word_pos(checkpoint.position);
        rng
    }

    /// Seed the stream started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Where the stream is now.
    #[must_use]
    pub fn checkpoint(&self) -> DealCheckpoint {
        DealCheckpoint {
            seed: self.seed,
            position: self.stream.get_word_pos(),
        }
    }

    /// A cut depth for a pile of `len` cards, in `1..len`.
    ///
    /// Piles under two cards cannot be cut and yield 0.
    pub fn cut_depth(&mut self, len: usize) -> usize {
        if len < 2 {
            return 0;
        }
        self.stream.gen_range(1..len)
    }

    /// Permute `items` in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.stream);
    }
}

/// A saved position in a [`DealRng`] stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DealCheckpoint {
    pub seed: u64,
    /// ChaCha word offset into the stream.
    pub position: u128,
}
