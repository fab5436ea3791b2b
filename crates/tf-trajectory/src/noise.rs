//! One-dimensional value noise.
//!
//! The real line is cut into cells of `cell_size` units.  Every integer cell
//! index gets a pseudo-random value in `[-1, 1]` computed by hashing
//! `(seed, cell)`; a query interpolates between the two neighbouring cell
//! values with the Hermite smoothstep `t²(3 − 2t)`.  The result is
//! continuous, bounded by `[-1, 1]`, and reproducible.

use tf_core::mix_seed;

/// Default cell size in sample units.
pub const DEFAULT_CELL_SIZE: f64 = 100.0;

/// Stateless smooth noise over the real line.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NoiseField1D {
    seed:      u64,
    cell_size: f64,
}

impl NoiseField1D {
    pub fn new(seed: u64) -> Self {
        Self::with_cell_size(seed, DEFAULT_CELL_SIZE)
    }

    /// `cell_size` must be positive; non-positive values fall back to
    /// [`DEFAULT_CELL_SIZE`].
    pub fn with_cell_size(seed: u64, cell_size: f64) -> Self {
        let cell_size = if cell_size > 0.0 { cell_size } else { DEFAULT_CELL_SIZE };
        Self { seed, cell_size }
    }

    /// Noise value at `x`, in `[-1, 1]`.
    pub fn sample(&self, x: f64) -> f64 {
        let cell = (x / self.cell_size).floor();
        let c0 = cell as i64;

        let v0 = self.cell_value(c0);
        let v1 = self.cell_value(c0.wrapping_add(1));

        let local = (x - cell * self.cell_size) / self.cell_size;
        let t = smoothstep(local.clamp(0.0, 1.0));
        v0 * (1.0 - t) + v1 * t
    }

    /// The lattice value for `cell`, in `[-1, 1)`.
    #[inline]
    pub fn cell_value(&self, cell: i64) -> f64 {
        let z = splitmix64(mix_seed(self.seed, cell as u64));
        // Top 53 bits → uniform [0, 1).
        let unit = (z >> 11) as f64 / (1u64 << 53) as f64;
        unit * 2.0 - 1.0
    }
}

#[inline]
fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// SplitMix64 finaliser.
#[inline]
fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
