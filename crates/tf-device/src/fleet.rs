//! Fluent construction of a fleet: device states plus their RNGs.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tf_device::{FleetBuilder, FleetConfig};
//!
//! let (devices, mut rngs) = FleetBuilder::new(FleetConfig::default(), /*seed=*/ 42)
//!     .build(&path)?;
//!
//! assert_eq!(devices.len(), rngs.len());
//! ```
//!
//! # Why two collections?
//!
//! The generation phase needs `&mut DeviceState` and `&mut DeviceRng` for the
//! same device while reading the shared path.  Keeping RNGs in a separate
//! [`DeviceRngs`] lets the simulation zip the two `Vec`s (and hand them to
//! Rayon's `par_iter_mut` under the `parallel` feature) without fighting the
//! borrow checker.

use std::collections::HashSet;

use tf_core::{DeviceId, DeviceIdentity, DeviceRng};
use tf_path::GeoPath;
use tf_trajectory::TrajectoryOffsetGenerator;

use crate::{DeviceResult, DeviceState, FleetConfig, StartPosition};

/// Fix quality indicators a device may report.
const QUALITY_LEVELS: [u8; 6] = [4, 5, 6, 7, 8, 9];

// ── DeviceRngs ────────────────────────────────────────────────────────────────

/// Per-device RNG state, indexed by `DeviceId`.
pub struct DeviceRngs {
    pub inner: Vec<DeviceRng>,
}

impl DeviceRngs {
    /// Seed `count` per-device RNGs from `global_seed`.
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| DeviceRng::new(global_seed, DeviceId(i)))
            .collect();
        Self { inner }
    }

    #[inline]
    pub fn get_mut(&mut self, device: DeviceId) -> &mut DeviceRng {
        &mut self.inner[device.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── FleetBuilder ──────────────────────────────────────────────────────────────

/// Builds [`DeviceState`]s with randomised but reproducible attributes.
///
/// Every attribute of device `i` is drawn from device `i`'s own RNG, so a
/// device's identity, speed, start position, and trajectory do not change
/// when the fleet grows.
pub struct FleetBuilder {
    config: FleetConfig,
    seed:   u64,
}

impl FleetBuilder {
    pub fn new(config: FleetConfig, seed: u64) -> Self {
        Self { config, seed }
    }

    /// Validate the configuration and construct the fleet on `path`.
    pub fn build(self, path: &GeoPath) -> DeviceResult<(Vec<DeviceState>, DeviceRngs)> {
        self.config.validate()?;

        let cfg = &self.config;
        let total = path.total_length_m();
        let mut rngs = DeviceRngs::new(cfg.device_count, self.seed);
        let mut seen: HashSet<DeviceIdentity> = HashSet::with_capacity(cfg.device_count);

        let devices = (0..cfg.device_count as u32)
            .map(|i| {
                let id = DeviceId(i);
                let rng = rngs.get_mut(id);

                // Redraw on the (astronomically rare) collision.
                let identity = loop {
                    let candidate = DeviceIdentity::random(rng.inner());
                    if seen.insert(candidate) {
                        break candidate;
                    }
                };

                let cruise_speed_kmh = rng.uniform(cfg.min_speed_kmh, cfg.max_speed_kmh);
                let arc_position_m = match cfg.start_position {
                    StartPosition::Random => rng.gen_range(0.0..total),
                    StartPosition::Fixed(m) => m.rem_euclid(total),
                };
                let satellites = rng.gen_range(10..=20u8);
                let quality = rng.choose(&QUALITY_LEVELS).copied().unwrap_or(QUALITY_LEVELS[0]);
                let cpu_temp_c = (rng.uniform(40.0, 75.0) * 10.0).round() / 10.0;
                let offset_seed: u64 = rng.random();

                DeviceState {
                    id,
                    identity,
                    cruise_speed_kmh,
                    arc_position_m,
                    satellites,
                    quality,
                    cpu_temp_c,
                    offset: TrajectoryOffsetGenerator::new(
                        offset_seed,
                        cfg.max_offset_m,
                        cfg.offset_wavelength_m,
                    ),
                }
            })
            .collect();

        Ok((devices, rngs))
    }
}
