//! Deterministic per-device and per-lane RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each device gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (device_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive device IDs uniformly across the seed space.
//!
//! - Devices never share RNG state, so the generation phase can run on any
//!   number of threads and still produce the same fixes.
//! - The network emulator keeps one [`SimRng`] per device lane, derived the
//!   same way (salted, keyed by the device's hardware address), so delay
//!   draws for one device do not depend on how many other devices enqueued
//!   before it.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::DeviceId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Combine a run seed with a stream index.
#[inline]
pub fn mix_seed(seed: u64, stream: u64) -> u64 {
    seed ^ stream.wrapping_mul(MIXING_CONSTANT)
}

/// Uniform draw from `[lo, hi]` that tolerates a degenerate range.
#[inline]
fn uniform_in(rng: &mut SmallRng, lo: f64, hi: f64) -> f64 {
    if hi > lo { rng.gen_range(lo..=hi) } else { lo }
}

// ── DeviceRng ─────────────────────────────────────────────────────────────────

/// Per-device deterministic RNG.
///
/// Stored in a parallel `Vec<DeviceRng>` alongside the fleet's device states
/// so the generation phase can borrow both mutably at once.
pub struct DeviceRng(SmallRng);

impl DeviceRng {
    /// Seed deterministically from the run's global seed and a device ID.
    pub fn new(global_seed: u64, device: DeviceId) -> Self {
        DeviceRng(SmallRng::seed_from_u64(mix_seed(global_seed, device.0 as u64)))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
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

    /// Uniform `f64` in `[lo, hi]`; returns `lo` when `hi <= lo`.
    #[inline]
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        uniform_in(&mut self.0, lo, hi)
    }

    /// Choose a random element from a non-empty slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// RNG for the network emulator.
///
/// One instance per device lane.  Never shared between threads.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed for one emulator lane, independent of every other lane.
    pub fn for_lane(global_seed: u64, lane: u64) -> Self {
        // Salt keeps lane streams distinct from the devices' own DeviceRngs.
        const LANE_SALT: u64 = 0x6c61_6e65_5f72_6e67;
        SimRng::new(mix_seed(global_seed ^ LANE_SALT, lane))
    }

    /// Uniform `f64` in `[lo, hi]`; returns `lo` when `hi <= lo`.
    #[inline]
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        uniform_in(&mut self.0, lo, hi)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
