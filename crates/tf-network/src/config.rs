//! Link impairment parameters.

use std::time::Duration;

use crate::{NetworkError, NetworkResult};

/// What happens to packets enqueued while a device is blacked out.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlackoutMode {
    /// Hold every packet and release them as a burst when the link returns.
    #[default]
    Buffer,
    /// Drop each packet with probability `drop_ratio`; buffer the rest.
    Drop { drop_ratio: f64 },
}

/// Per-device link model.
///
/// All durations are relative to the moment a packet is enqueued.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkConfig {
    /// Lower bound of the normal delay.
    pub base_delay: Duration,
    /// Upper bound of the normal delay (before spikes).
    pub max_delay:  Duration,

    /// Chance, per packet, of an extra `U(0, spike_delay)` on top.
    pub spike_probability: f64,
    pub spike_delay:       Duration,

    /// Blackout onset rate, per second of elapsed time between enqueues.
    pub blackout_prob_per_sec: f64,
    pub blackout_min:          Duration,
    pub blackout_max:          Duration,
    pub blackout_mode:         BlackoutMode,

    /// Spacing between packets released after a blackout.
    pub flush_compaction: Duration,

    /// Per-device queue cap.  `None` means unbounded.
    pub max_queue_per_device: Option<usize>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            base_delay:            Duration::from_millis(50),
            max_delay:             Duration::from_millis(250),
            spike_probability:     0.04,
            spike_delay:           Duration::from_millis(1000),
            blackout_prob_per_sec: 0.02,
            blackout_min:          Duration::from_millis(400),
            blackout_max:          Duration::from_millis(1600),
            blackout_mode:         BlackoutMode::Buffer,
            flush_compaction:      Duration::from_millis(8),
            max_queue_per_device:  None,
        }
    }
}

impl NetworkConfig {
    /// A perfect link: no delay, no spikes, no blackouts.
    pub fn ideal() -> Self {
        Self {
            base_delay:            Duration::ZERO,
            max_delay:             Duration::ZERO,
            spike_probability:     0.0,
            spike_delay:           Duration::ZERO,
            blackout_prob_per_sec: 0.0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> NetworkResult<()> {
        if self.max_delay < self.base_delay {
            return Err(NetworkError::Config(format!(
                "max delay ({:?}) must be >= base delay ({:?})",
                self.max_delay, self.base_delay
            )));
        }
        check_probability("spike probability", self.spike_probability)?;
        if !self.blackout_prob_per_sec.is_finite() || self.blackout_prob_per_sec < 0.0 {
            return Err(NetworkError::Config(format!(
                "blackout probability per second must be finite and >= 0, got {}",
                self.blackout_prob_per_sec
            )));
        }
        if self.blackout_max < self.blackout_min {
            return Err(NetworkError::Config(format!(
                "blackout max ({:?}) must be >= blackout min ({:?})",
                self.blackout_max, self.blackout_min
            )));
        }
        if let BlackoutMode::Drop { drop_ratio } = self.blackout_mode {
            check_probability("drop ratio", drop_ratio)?;
        }
        if self.max_queue_per_device == Some(0) {
            return Err(NetworkError::Config("per-device queue cap must be > 0".into()));
        }
        Ok(())
    }
}

fn check_probability(name: &str, p: f64) -> NetworkResult<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(NetworkError::Config(format!("{name} must be in [0, 1], got {p}")))
    }
}
