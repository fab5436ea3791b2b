//! `NetworkEmulator` — turns "send now" into "arrives later, maybe".
//!
//! # Lanes
//!
//! Each device identity owns a lane: its own [`DeliveryQueue`], its own
//! [`BlackoutState`], and its own [`SimRng`] seeded from the run seed and
//! the identity.  Lanes are created on the first enqueue and never share
//! state, so a device's delays are reproducible regardless of how many
//! other devices exist or in which order they were processed.
//!
//! # Per-enqueue algorithm
//!
//! ```text
//! dt = now - lane.last_enqueue                      (0 on first enqueue)
//! blackout.maybe_start(now, dt)                     p·dt Bernoulli
//! blackout.update(now)                              lazy exit
//! queue full?                  → Rejected           (overflow_dropped)
//! in blackout:
//!     drop mode & roll(ratio)  → Dropped            (blackouts_dropped)
//!     delivery = max(until, next_flush); next_flush += compaction
//! else:
//!     delivery = now + base + U(0, max - base) [+ U(0, spike)]
//! ```
//!
//! `flush_due` pops every due packet per lane; per-lane order is the
//! queue's `(delivery_time, seq)` order.  Cross-lane order is unspecified.

use std::time::Duration;

use tf_core::{CaptureTime, Clock, DeviceIdentity, SimRng, SimTime};
use tracing::{debug, info, warn};

use crate::{
    BlackoutMode, BlackoutState, DeliveryQueue, NetworkConfig, NetworkResult, NetworkStats,
    ScheduledPacket, Transport,
};

#[cfg(feature = "fx-hash")]
type LaneMap = rustc_hash::FxHashMap<DeviceIdentity, Lane>;
#[cfg(not(feature = "fx-hash"))]
type LaneMap = std::collections::HashMap<DeviceIdentity, Lane>;

/// Poll interval while draining at shutdown.
pub const DRAIN_POLL: Duration = Duration::from_millis(10);

// ── Outcomes ──────────────────────────────────────────────────────────────────

/// What `enqueue` did with a packet.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EnqueueOutcome {
    /// Queued for delivery at the given time.
    Scheduled(SimTime),
    /// Lost to a drop-mode blackout.
    Dropped,
    /// The device's queue was at its cap.
    Rejected,
}

/// One packet handed to the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliveryRecord {
    pub identity:      DeviceIdentity,
    pub captured_at:   CaptureTime,
    /// Scheduled delivery time.
    pub delivery_time: SimTime,
    /// When the flush actually ran (`>= delivery_time`).
    pub flushed_at:    SimTime,
    pub bytes:         usize,
    pub ok:            bool,
}

#[derive(Clone, Debug, Default)]
pub struct FlushReport {
    pub sent:    usize,
    pub failed:  usize,
    pub records: Vec<DeliveryRecord>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub sent:      usize,
    pub failed:    usize,
    /// Packets still queued at the deadline, discarded unsent.
    pub discarded: usize,
}

// ── Lane ──────────────────────────────────────────────────────────────────────

struct Lane {
    queue:        DeliveryQueue,
    blackout:     BlackoutState,
    rng:          SimRng,
    last_enqueue: SimTime,
}

impl Lane {
    fn new(global_seed: u64, identity: DeviceIdentity, now: SimTime) -> Self {
        Self {
            queue:        DeliveryQueue::new(),
            blackout:     BlackoutState::default(),
            rng:          SimRng::for_lane(global_seed, identity.as_u64()),
            last_enqueue: now,
        }
    }
}

// ── NetworkEmulator ───────────────────────────────────────────────────────────

pub struct NetworkEmulator {
    config: NetworkConfig,
    seed:   u64,
    lanes:  LaneMap,
    stats:  NetworkStats,
}

impl NetworkEmulator {
    /// Validate `config` and build an emulator with no lanes.
    pub fn new(config: NetworkConfig, seed: u64) -> NetworkResult<Self> {
        config.validate()?;
        Ok(Self { config, seed, lanes: LaneMap::default(), stats: NetworkStats::default() })
    }

    pub fn stats(&self) -> &NetworkStats {
        &self.stats
    }

    /// Total packets waiting across all lanes.
    pub fn pending(&self) -> usize {
        self.stats.current_queue_size
    }

    pub fn is_empty(&self) -> bool {
        self.stats.current_queue_size == 0
    }

    /// Packets waiting for one device.
    pub fn pending_for(&self, identity: DeviceIdentity) -> usize {
        self.lanes.get(&identity).map_or(0, |l| l.queue.len())
    }

    /// Current link state for one device, if it has ever enqueued.
    pub fn blackout_state(&self, identity: DeviceIdentity) -> Option<BlackoutState> {
        self.lanes.get(&identity).map(|l| l.blackout)
    }

    /// Earliest scheduled delivery across all lanes.
    pub fn next_delivery_time(&self) -> Option<SimTime> {
        self.lanes.values().filter_map(|l| l.queue.next_time()).min()
    }

    /// Schedule one payload captured at `captured_at` for `identity`.
    pub fn enqueue(
        &mut self,
        identity:    DeviceIdentity,
        captured_at: CaptureTime,
        payload:     Vec<u8>,
        now:         SimTime,
    ) -> EnqueueOutcome {
        let seed = self.seed;
        let cfg = &self.config;
        let stats = &mut self.stats;
        let lane = self
            .lanes
            .entry(identity)
            .or_insert_with(|| Lane::new(seed, identity, now));

        let dt_secs = now.saturating_since(lane.last_enqueue).as_secs_f64();
        lane.last_enqueue = lane.last_enqueue.max(now);

        if let Some(until) = lane.blackout.maybe_start(
            now,
            dt_secs,
            cfg.blackout_prob_per_sec,
            cfg.blackout_min,
            cfg.blackout_max,
            &mut lane.rng,
        ) {
            stats.blackouts_started += 1;
            debug!(device = %identity, %now, %until, "blackout started");
        }
        if lane.blackout.update(now) {
            debug!(device = %identity, %now, "blackout ended");
        }

        if let Some(cap) = cfg.max_queue_per_device {
            if lane.queue.len() >= cap {
                stats.overflow_dropped += 1;
                return EnqueueOutcome::Rejected;
            }
        }

        let delivery_time = if lane.blackout.in_blackout {
            if let BlackoutMode::Drop { drop_ratio } = cfg.blackout_mode {
                if lane.rng.gen_bool(drop_ratio) {
                    stats.blackouts_dropped += 1;
                    return EnqueueOutcome::Dropped;
                }
            }
            lane.blackout.next_release(cfg.flush_compaction)
        } else {
            let (delay, spiked) = normal_delay(cfg, &mut lane.rng);
            if spiked {
                stats.spikes_triggered += 1;
            }
            now + delay
        };

        lane.queue.push(ScheduledPacket { delivery_time, captured_at, payload });
        stats.packets_queued += 1;
        stats.current_queue_size += 1;
        stats.max_queue_size = stats.max_queue_size.max(stats.current_queue_size);
        EnqueueOutcome::Scheduled(delivery_time)
    }

    /// Deliver every packet due at `now`.
    ///
    /// Send failures are logged and counted; the packet is not re-queued and
    /// the flush continues with the next one.
    pub fn flush_due<T: Transport + ?Sized>(&mut self, now: SimTime, transport: &mut T) -> FlushReport {
        let mut report = FlushReport::default();
        let stats = &mut self.stats;

        for (&identity, lane) in self.lanes.iter_mut() {
            if lane.blackout.update(now) {
                debug!(device = %identity, %now, "blackout ended");
            }
            while let Some(packet) = lane.queue.pop_due(now) {
                stats.current_queue_size -= 1;
                let ok = match transport.deliver(&packet.payload) {
                    Ok(()) => {
                        stats.packets_sent += 1;
                        report.sent += 1;
                        true
                    }
                    Err(e) => {
                        stats.send_failures += 1;
                        report.failed += 1;
                        warn!(device = %identity, error = %e, "send failed");
                        false
                    }
                };
                report.records.push(DeliveryRecord {
                    identity,
                    captured_at:   packet.captured_at,
                    delivery_time: packet.delivery_time,
                    flushed_at:    now,
                    bytes:         packet.payload.len(),
                    ok,
                });
            }
        }
        report
    }

    /// Flush repeatedly until every lane is empty or `deadline` passes, then
    /// discard whatever is left.
    ///
    /// `on_flush` sees the records of every non-empty flush, in order.
    pub fn drain_all<C, T, F>(
        &mut self,
        clock:        &C,
        deadline:     SimTime,
        transport:    &mut T,
        mut on_flush: F,
    ) -> DrainReport
    where
        C: Clock + ?Sized,
        T: Transport + ?Sized,
        F: FnMut(&[DeliveryRecord]),
    {
        let mut report = DrainReport::default();
        loop {
            let now = clock.now();
            let flushed = self.flush_due(now, transport);
            report.sent += flushed.sent;
            report.failed += flushed.failed;
            if !flushed.records.is_empty() {
                on_flush(&flushed.records);
            }

            if self.is_empty() || now >= deadline {
                break;
            }
            clock.sleep(DRAIN_POLL.min(deadline.saturating_since(now)));
        }

        report.discarded = self.lanes.values_mut().map(|l| l.queue.clear()).sum();
        self.stats.current_queue_size = 0;
        info!(
            sent = report.sent,
            failed = report.failed,
            discarded = report.discarded,
            "network drain finished"
        );
        report
    }
}

/// `base + U(0, max - base)`, plus `U(0, spike)` with the spike probability.
fn normal_delay(cfg: &NetworkConfig, rng: &mut SimRng) -> (Duration, bool) {
    let base = cfg.base_delay.as_secs_f64();
    let spread = (cfg.max_delay.as_secs_f64() - base).max(0.0);
    let mut secs = base + rng.uniform(0.0, spread);

    let spiked = cfg.spike_probability > 0.0 && rng.gen_bool(cfg.spike_probability);
    if spiked {
        secs += rng.uniform(0.0, cfg.spike_delay.as_secs_f64());
    }
    (Duration::from_secs_f64(secs), spiked)
}
