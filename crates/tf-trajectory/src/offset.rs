//! Metre offsets from two independent noise fields.

use tf_core::GeoPoint;

use crate::NoiseField1D;

/// Seed offset of the east-west field relative to the north-south one.
const SECOND_FIELD_SEED_OFFSET: u64 = 999_999;

/// A device's smooth deviation from the path centre line.
///
/// `offset_at(d)` samples both fields at `d / wavelength_m` and scales by
/// `max_offset_m`, so every component stays within `±max_offset_m` and
/// changes gradually as the device moves.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrajectoryOffsetGenerator {
    north:        NoiseField1D,
    east:         NoiseField1D,
    max_offset_m: f64,
    wavelength_m: f64,
}

impl TrajectoryOffsetGenerator {
    /// `max_offset_m` is clamped to `>= 0`.  A non-positive `wavelength_m`
    /// is treated as 1 m.
    pub fn new(seed: u64, max_offset_m: f64, wavelength_m: f64) -> Self {
        Self {
            north:        NoiseField1D::new(seed),
            east:         NoiseField1D::new(seed.wrapping_add(SECOND_FIELD_SEED_OFFSET)),
            max_offset_m: max_offset_m.max(0.0),
            wavelength_m: if wavelength_m > 0.0 { wavelength_m } else { 1.0 },
        }
    }

    /// A generator that never moves a point.
    pub fn zero() -> Self {
        Self::new(0, 0.0, 1.0)
    }

    /// `(north_m, east_m)` offset after travelling `distance_m`.
    pub fn offset_at(&self, distance_m: f64) -> (f64, f64) {
        let x = distance_m / self.wavelength_m;
        (
            self.north.sample(x) * self.max_offset_m,
            self.east.sample(x) * self.max_offset_m,
        )
    }

    /// `base` displaced by the offset at `distance_m`.
    pub fn apply(&self, base: GeoPoint, distance_m: f64) -> GeoPoint {
        let (north_m, east_m) = self.offset_at(distance_m);
        base.offset_by_m(north_m, east_m)
    }
}
