//! Fleet configuration.

use crate::{DeviceError, DeviceResult, EndBehavior};

/// Where devices start on the path.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StartPosition {
    /// Uniform in `[0, path length)`, independently per device.
    #[default]
    Random,
    /// Every device starts this many metres along the path (wrapped into
    /// the path length).
    Fixed(f64),
}

/// Shape of the simulated fleet.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetConfig {
    pub device_count: usize,

    /// Each device's cruise speed is drawn uniformly from
    /// `[min_speed_kmh, max_speed_kmh]`.
    pub min_speed_kmh: f64,
    pub max_speed_kmh: f64,

    /// Per-tick uniform speed perturbation, ± km/h.
    pub speed_jitter_kmh: f64,

    pub end_behavior: EndBehavior,

    /// Largest lateral deviation from the centre line, metres.
    pub max_offset_m: f64,

    /// Distance scale over which the deviation changes, metres.
    pub offset_wavelength_m: f64,

    pub start_position: StartPosition,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            device_count:        5,
            min_speed_kmh:       30.0,
            max_speed_kmh:       60.0,
            speed_jitter_kmh:    0.5,
            end_behavior:        EndBehavior::Loop,
            max_offset_m:        5.0,
            offset_wavelength_m: 50.0,
            start_position:      StartPosition::Random,
        }
    }
}

impl FleetConfig {
    /// Reject values the core cannot run with.  Called once at start-up,
    /// never on the hot path.
    pub fn validate(&self) -> DeviceResult<()> {
        if self.device_count == 0 {
            return Err(DeviceError::Config("device count must be > 0".into()));
        }
        if !(self.min_speed_kmh.is_finite() && self.max_speed_kmh.is_finite())
            || self.min_speed_kmh <= 0.0
            || self.max_speed_kmh < self.min_speed_kmh
        {
            return Err(DeviceError::Config(format!(
                "invalid speed range {}..{} km/h (need 0 < min <= max)",
                self.min_speed_kmh, self.max_speed_kmh
            )));
        }
        if !self.speed_jitter_kmh.is_finite() || self.speed_jitter_kmh < 0.0 {
            return Err(DeviceError::Config("speed jitter must be >= 0".into()));
        }
        if !self.max_offset_m.is_finite() || self.max_offset_m < 0.0 {
            return Err(DeviceError::Config("max offset must be >= 0".into()));
        }
        if !self.offset_wavelength_m.is_finite() || self.offset_wavelength_m <= 0.0 {
            return Err(DeviceError::Config("offset wavelength must be > 0".into()));
        }
        if let StartPosition::Fixed(m) = self.start_position {
            if !m.is_finite() || m < 0.0 {
                return Err(DeviceError::Config(format!("start position {m} m must be >= 0")));
            }
        }
        Ok(())
    }
}
