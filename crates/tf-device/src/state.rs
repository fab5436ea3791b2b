//! Per-device progress along the path.

use tf_core::{CaptureTime, DeviceId, DeviceIdentity, DeviceRng, GeoPoint};
use tf_path::GeoPath;
use tf_trajectory::TrajectoryOffsetGenerator;

use crate::TelemetryFix;

/// How far short of the end a non-looping device parks, in metres.
pub const PARK_EPSILON_M: f64 = 1e-6;

/// What a device does when it reaches the end of the path.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndBehavior {
    /// Wrap back to the start (closed circuits).
    #[default]
    Loop,
    /// Stop just before the last point and stay there.
    Park,
}

/// One simulated device.
///
/// Mutated once per tick by the simulation loop.  Devices never reference
/// each other; the offset generator is owned exclusively by its device.
#[derive(Clone, Debug)]
pub struct DeviceState {
    pub id: DeviceId,

    /// Hardware address reported on the wire.
    pub identity: DeviceIdentity,

    /// Commanded speed before per-tick jitter.
    pub cruise_speed_kmh: f64,

    /// Distance travelled along the path, metres.  Always in
    /// `[0, path length)`.
    pub arc_position_m: f64,

    pub satellites: u8,

    /// GPS fix quality indicator.
    pub quality: u8,

    /// Reported CPU temperature, °C (one decimal place).
    pub cpu_temp_c: f64,

    pub offset: TrajectoryOffsetGenerator,
}

impl DeviceState {
    /// Move the device forward by `elapsed_secs` of travel.
    ///
    /// The instantaneous speed is `cruise ± U(-jitter, +jitter)`, floored at
    /// zero.  On passing `path_length_m` the position wraps (`Loop`) or parks
    /// at `path_length_m - PARK_EPSILON_M` (`Park`).
    ///
    /// Returns the instantaneous speed in km/h, for the payload.
    pub fn advance(
        &mut self,
        elapsed_secs:     f64,
        speed_jitter_kmh: f64,
        rng:              &mut DeviceRng,
        path_length_m:    f64,
        end:              EndBehavior,
    ) -> f64 {
        let jitter = speed_jitter_kmh.abs();
        let speed_kmh = (self.cruise_speed_kmh + rng.uniform(-jitter, jitter)).max(0.0);

        self.arc_position_m += speed_kmh / 3.6 * elapsed_secs.max(0.0);
        if self.arc_position_m >= path_length_m {
            self.arc_position_m = match end {
                EndBehavior::Loop => self.arc_position_m.rem_euclid(path_length_m),
                EndBehavior::Park => (path_length_m - PARK_EPSILON_M).max(0.0),
            };
        }
        speed_kmh
    }

    /// Emitted position: the path point at the current arc position, pushed
    /// sideways by this device's trajectory offset.
    pub fn position(&self, path: &GeoPath) -> GeoPoint {
        let base = path.position_at(self.arc_position_m);
        self.offset.apply(base, self.arc_position_m)
    }

    /// Build the telemetry fix for this tick.
    pub fn fix(&self, path: &GeoPath, speed_kmh: f64, captured_at: CaptureTime) -> TelemetryFix {
        TelemetryFix {
            identity:   self.identity,
            position:   self.position(path),
            satellites: self.satellites,
            quality:    self.quality,
            speed_kmh,
            captured_at,
            cpu_temp_c: self.cpu_temp_c,
        }
    }
}
