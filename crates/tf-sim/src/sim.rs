//! The `Sim` struct and its tick loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tf_core::{CaptureTime, Clock, DeviceIdentity, DeviceRng, SimTime, Tick};
use tf_device::{DeviceRngs, DeviceState, EndBehavior};
use tf_network::{DrainReport, EnqueueOutcome, NetworkEmulator, Transport};
use tf_path::GeoPath;
use tracing::info;

use crate::{SimConfig, SimObserver, SimReport, SimResult, TickSummary};

/// One device's output from the generation phase.
struct Generated {
    identity: DeviceIdentity,
    payload:  Vec<u8>,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<C, T>` owns every piece of state and drives the tick loop:
///
/// 1. **Governor**: sleep until `1 / tick_hz` has passed since the previous
///    tick; `elapsed` is the real gap, so a slow tick moves devices further.
/// 2. **Generate** (optionally parallel with the `parallel` feature): every
///    device advances by `elapsed`, reads its position, and formats a fix
///    stamped with this tick's capture time.
/// 3. **Enqueue** (sequential, ascending `DeviceId`): hand each payload to
///    the network emulator.
/// 4. **Flush**: deliver everything whose delivery time has come.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<C: Clock, T: Transport> {
    pub config: SimConfig,

    /// The path every device follows.
    pub path: GeoPath,

    /// Device states, indexed by `DeviceId`.
    pub devices: Vec<DeviceState>,

    /// Per-device RNGs, separated for the split-borrow pattern.
    pub rngs: DeviceRngs,

    pub speed_jitter_kmh: f64,
    pub end_behavior:     EndBehavior,

    pub network:   NetworkEmulator,
    pub clock:     C,
    pub transport: T,

    pub(crate) stop:      Arc<AtomicBool>,
    pub(crate) tick:      Tick,
    pub(crate) last_tick: SimTime,
}

impl<C: Clock, T: Transport> Sim<C, T> {
    // ── Public API ────────────────────────────────────────────────────────

    /// The next tick to run.
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    /// A handle that stops [`run`][Self::run] when set to `true`.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Run until the stop flag is raised, then drain the network.
    ///
    /// The flag is checked once per tick, so shutdown latency is at most one
    /// tick interval plus the drain timeout.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<SimReport> {
        let first = self.tick;
        info!(
            devices = self.devices.len(),
            hz = self.config.tick_hz,
            path_m = self.path.total_length_m(),
            "simulation started"
        );
        while !self.stop.load(Ordering::Relaxed) {
            self.step(observer);
        }
        info!(ticks = self.tick.0 - first.0, "stop requested, draining");

        let drain = self.drain(observer);
        let report = SimReport { ticks: self.tick.0 - first.0, stats: *self.network.stats(), drain };
        observer.on_sim_end(&report);
        Ok(report)
    }

    /// Run exactly `n` ticks, ignoring the stop flag and without draining.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer);
        }
        Ok(())
    }

    /// Flush what remains, up to `config.drain_timeout` from now.
    ///
    /// Drained deliveries reach `observer.on_deliveries` under the tick that
    /// would have run next.
    pub fn drain<O: SimObserver>(&mut self, observer: &mut O) -> DrainReport {
        let deadline = self.clock.now() + self.config.drain_timeout;
        let tick = self.tick;
        self.network.drain_all(&self.clock, deadline, &mut self.transport, |records| {
            observer.on_deliveries(tick, records);
        })
    }

    /// Execute one tick and report what happened.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> TickSummary {
        let tick = self.tick;
        observer.on_tick_start(tick);

        // ── Rate governor ─────────────────────────────────────────────────
        let interval = self.config.tick_interval();
        let mut now = self.clock.now();
        let since = now.saturating_since(self.last_tick);
        if since < interval {
            self.clock.sleep(interval - since);
            now = self.clock.now();
        }
        let elapsed_secs = now.saturating_since(self.last_tick).as_secs_f64();
        self.last_tick = now;

        // ── Generate ──────────────────────────────────────────────────────
        let captured_at = CaptureTime::from_unix_ms(self.clock.unix_ms());
        let generated = self.generate(elapsed_secs, captured_at);

        // ── Enqueue (ascending DeviceId) ──────────────────────────────────
        let mut summary = TickSummary { tick, now, generated: generated.len(), ..TickSummary::default() };
        for g in generated {
            match self.network.enqueue(g.identity, captured_at, g.payload, now) {
                EnqueueOutcome::Scheduled(_) => summary.enqueued += 1,
                EnqueueOutcome::Dropped | EnqueueOutcome::Rejected => summary.dropped += 1,
            }
        }

        // ── Flush ─────────────────────────────────────────────────────────
        let flushed = self.network.flush_due(now, &mut self.transport);
        summary.sent = flushed.sent;
        summary.failed = flushed.failed;
        summary.queue_size = self.network.pending();
        if !flushed.records.is_empty() {
            observer.on_deliveries(tick, &flushed.records);
        }

        observer.on_tick_end(&summary, self.network.stats());
        self.tick = tick.next();
        summary
    }

    // ── Generation phase ──────────────────────────────────────────────────

    /// Advance every device and build its payload.
    ///
    /// Devices share only the read-only path, so with the `parallel` feature
    /// this runs on Rayon's thread pool.  Output order is `DeviceId` order
    /// either way.
    fn generate(&mut self, elapsed_secs: f64, captured_at: CaptureTime) -> Vec<Generated> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let path   = &self.path;
        let jitter = self.speed_jitter_kmh;
        let end    = self.end_behavior;
        let total  = path.total_length_m();

        let one = |device: &mut DeviceState, rng: &mut DeviceRng| {
            let speed = device.advance(elapsed_secs, jitter, rng, total, end);
            let fix = device.fix(path, speed, captured_at);
            Generated { identity: device.identity, payload: fix.encode() }
        };

        #[cfg(not(feature = "parallel"))]
        {
            self.devices
                .iter_mut()
                .zip(self.rngs.inner.iter_mut())
                .map(|(d, r)| one(d, r))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            self.devices
                .par_iter_mut()
                .zip(self.rngs.inner.par_iter_mut())
                .map(|(d, r)| one(d, r))
                .collect()
        }
    }
}
