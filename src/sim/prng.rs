//! Deterministic pseudo-random generator (Mulberry32)
//!
//! This sequence is the replay contract for the whole game: a given seed
//! must yield the same `next()` values bit-for-bit in every implementation.
//! All arithmetic is 32-bit wrapping.

use rand::rand_core::impls;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

const GOLDEN_GAMMA: u32 = 0x6D2B_79F5;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Mulberry32 generator
///
/// Holds a single `u32` of state. Each instance is a serial resource:
/// draws for one simulated entity must happen in a fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prng {
    state: u32,
}

impl Prng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Resume from a saved state word
    pub fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Current state word (for saves)
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advance and return the raw 32-bit output
    #[inline]
    fn step(&mut self) -> u32 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Next value in [0, 1)
    pub fn next(&mut self) -> f64 {
        self.step() as f64 / TWO_POW_32
    }

    /// Uniform value in [min, max)
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next()
    }

    /// Uniformly pick one element; consumes one draw
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, SimError> {
        if items.is_empty() {
            return Err(SimError::EmptyInput { what: "pick" });
        }
        let idx = (self.next() * items.len() as f64) as usize;
        Ok(&items[idx.min(items.len() - 1)])
    }

    /// Normally distributed value (Box-Muller); consumes two draws
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next().max(f64::MIN_POSITIVE);
        let u2 = self.next();
        let z0 = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
        z0 * std_dev + mean
    }
}

impl RngCore for Prng {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }
}

impl SeedableRng for Prng {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

/// Derives independent generator seeds from one master seed
///
/// Entities simulated in parallel each need their own `Prng`. Stream `k`
/// always gets the same seed for a given master, regardless of which other
/// streams were requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedBank {
    master_seed: u64,
}

impl SeedBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// Seed for stream `stream`
    pub fn seed_for(&self, stream: u64) -> u32 {
        Pcg32::new(self.master_seed, stream).next_u32()
    }

    /// Fresh generator for stream `stream`
    pub fn prng_for(&self, stream: u64) -> Prng {
        Prng::new(self.seed_for(stream))
    }
}
