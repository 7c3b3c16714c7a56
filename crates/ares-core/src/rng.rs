//! Deterministic per-simulation RNG wrapper.
//!
//! # Determinism strategy
//!
//! Each simulation gets its own independent `SmallRng` seeded by:
//!
//!   seed = master_seed XOR (simulation_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive simulation ids uniformly across the seed space.
//! Two simulations started from the same configuration therefore diverge,
//! while re-running with the same master seed reproduces both.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::SimulationId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-simulation deterministic RNG.
///
/// Owned by the simulation and lent mutably to each behavior in turn during
/// a tick.  Never shared across threads.
pub struct SimRng(SmallRng);

impl SimRng {
    /// Seed directly.
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed deterministically from the engine's master seed and a simulation id.
    pub fn for_simulation(master_seed: u64, sim: SimulationId) -> Self {
        let seed = master_seed ^ (sim.0 as u64).wrapping_mul(MIXING_CONSTANT);
        SimRng::new(seed)
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
