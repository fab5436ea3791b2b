//! Loop-level configuration.

use std::time::Duration;

use crate::{SimError, SimResult};

/// Parameters of the tick loop itself.  Fleet and link parameters live in
/// `FleetConfig` and `NetworkConfig`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Target tick rate.  The governor sleeps to hold `1 / tick_hz`.
    pub tick_hz: f64,

    /// Master seed.  Device attributes, speed jitter, and network draws all
    /// derive from it.
    pub seed: u64,

    /// How often `StatsLogger` emits a line, in simulated time.
    pub stats_interval: Duration,

    /// Upper bound on the shutdown drain.
    pub drain_timeout: Duration,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_hz:        15.0,
            seed:           42,
            stats_interval: Duration::from_secs(5),
            drain_timeout:  Duration::from_secs(5),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> SimResult<()> {
        if !self.tick_hz.is_finite() || self.tick_hz <= 0.0 {
            return Err(SimError::Config(format!("tick rate must be > 0 Hz, got {}", self.tick_hz)));
        }
        if Duration::try_from_secs_f64(1.0 / self.tick_hz).is_err() {
            return Err(SimError::Config(format!("tick rate {} Hz is too slow", self.tick_hz)));
        }
        Ok(())
    }

    /// Target wall time between ticks; saturates for rates `validate` rejects.
    pub fn tick_interval(&self) -> Duration {
        Duration::try_from_secs_f64(1.0 / self.tick_hz).unwrap_or(Duration::MAX)
    }
}
