//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! The engine is strictly single-threaded and every process step runs to
//! completion before the next one starts, so one seeded stream serves the
//! whole run: as long as steps execute in the same order (guaranteed by the
//! event queue's insertion-order tie-break), every sample lands in the same
//! place.  Two runs with the same seed and input produce identical logs.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// The run-owned RNG stream.
///
/// Created once by the engine from `SimConfig::seed` and threaded by mutable
/// reference into every sampling site.  The type is `!Sync` by construction —
/// there is no second thread to share it with.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand_distr` distribution
    /// types (`dist.sample(rng.inner())`).
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
