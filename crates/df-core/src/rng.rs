//! Random number generation for dungeon generation
//!
//! Uses a seeded ChaCha RNG so a seed and a configuration always reproduce
//! the same floor plan.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Random source threaded through catalog sampling, placement and door selection
///
/// Wraps ChaCha8Rng. Only the seed is serialized; deserializing restarts the
/// stream from the beginning of that seed.
#[derive(Debug, Clone)]
pub struct DungeonRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl Serialize for DungeonRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DungeonRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(DungeonRng::new(seed))
    }
}

impl DungeonRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index into a collection of `len` items, `None` when empty
    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.rng.gen_range(0..len))
        }
    }

    /// Choose a random element from a slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.index(items.len()).map(|i| &items[i])
    }

    /// Shuffle a slice in place (Fisher-Yates)
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.rng.gen_range(0..=i);
            items.swap(i, j);
        }
    }
}

impl Default for DungeonRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
