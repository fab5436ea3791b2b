//! Per-device link state machine: `Normal ⇄ Blackout`.
//!
//! ```text
//!            p·dt Bernoulli on enqueue
//!   Normal ────────────────────────────▶ Blackout { until }
//!     ▲                                       │
//!     └──── now >= until (enqueue or flush) ──┘  next_flush_time = now
//! ```

use std::time::Duration;

use tf_core::{SimRng, SimTime};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BlackoutState {
    pub in_blackout:     bool,
    pub blackout_until:  SimTime,
    /// Earliest release slot for the next buffered packet.
    pub next_flush_time: SimTime,
}

impl BlackoutState {
    /// Roll for a blackout starting at `now`, given `dt_secs` since the
    /// device's previous enqueue.  Returns the blackout end if one starts.
    pub fn maybe_start(
        &mut self,
        now:          SimTime,
        dt_secs:      f64,
        prob_per_sec: f64,
        min:          Duration,
        max:          Duration,
        rng:          &mut SimRng,
    ) -> Option<SimTime> {
        if self.in_blackout || prob_per_sec <= 0.0 || dt_secs <= 0.0 {
            return None;
        }
        if !rng.gen_bool(prob_per_sec * dt_secs) {
            return None;
        }
        let secs = rng.uniform(min.as_secs_f64(), max.as_secs_f64());
        self.in_blackout = true;
        self.blackout_until = now + Duration::from_secs_f64(secs);
        Some(self.blackout_until)
    }

    /// Leave the blackout once `now` has reached its end.  Returns `true`
    /// on the transition.
    pub fn update(&mut self, now: SimTime) -> bool {
        if self.in_blackout && now >= self.blackout_until {
            self.in_blackout = false;
            self.next_flush_time = now;
            true
        } else {
            false
        }
    }

    /// Release slot for a buffered packet; advances the slot by
    /// `compaction`.
    pub fn next_release(&mut self, compaction: Duration) -> SimTime {
        let at = self.blackout_until.max(self.next_flush_time);
        self.next_flush_time = at + compaction;
        at
    }
}
