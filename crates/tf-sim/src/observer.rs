//! Simulation observer trait for progress reporting and data collection.

use tf_core::{SimTime, Tick};
use tf_network::{DeliveryRecord, DrainReport, NetworkStats};

/// What happened during one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub tick: Tick,
    /// Clock reading after the rate governor.
    pub now:  SimTime,

    /// Fixes generated (one per device).
    pub generated: usize,
    /// Of those, how many the network accepted.
    pub enqueued:  usize,
    /// Lost to drop-mode blackouts or queue caps.
    pub dropped:   usize,

    pub sent:       usize,
    pub failed:     usize,
    /// Packets still queued after this tick's flush.
    pub queue_size: usize,
}

/// Returned by [`Sim::run`][crate::Sim::run] once the loop has stopped and
/// the network has drained.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SimReport {
    pub ticks: u64,
    pub stats: NetworkStats,
    pub drain: DrainReport,
}

/// Callbacks invoked by the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait SimObserver {
    /// Called at the very start of each tick, before the rate governor.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called with every packet handed to the transport this tick.
    fn on_deliveries(&mut self, _tick: Tick, _records: &[DeliveryRecord]) {}

    /// Called at the end of each tick with the emulator's running counters.
    fn on_tick_end(&mut self, _summary: &TickSummary, _stats: &NetworkStats) {}

    /// Called once after the shutdown drain.
    fn on_sim_end(&mut self, _report: &SimReport) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Fan out to two observers, first `A` then `B`.
impl<A: SimObserver, B: SimObserver> SimObserver for (A, B) {
    fn on_tick_start(&mut self, tick: Tick) {
        self.0.on_tick_start(tick);
        self.1.on_tick_start(tick);
    }

    fn on_deliveries(&mut self, tick: Tick, records: &[DeliveryRecord]) {
        self.0.on_deliveries(tick, records);
        self.1.on_deliveries(tick, records);
    }

    fn on_tick_end(&mut self, summary: &TickSummary, stats: &NetworkStats) {
        self.0.on_tick_end(summary, stats);
        self.1.on_tick_end(summary, stats);
    }

    fn on_sim_end(&mut self, report: &SimReport) {
        self.0.on_sim_end(report);
        self.1.on_sim_end(report);
    }
}

impl<O: SimObserver + ?Sized> SimObserver for &mut O {
    fn on_tick_start(&mut self, tick: Tick) {
        (**self).on_tick_start(tick);
    }

    fn on_deliveries(&mut self, tick: Tick, records: &[DeliveryRecord]) {
        (**self).on_deliveries(tick, records);
    }

    fn on_tick_end(&mut self, summary: &TickSummary, stats: &NetworkStats) {
        (**self).on_tick_end(summary, stats);
    }

    fn on_sim_end(&mut self, report: &SimReport) {
        (**self).on_sim_end(report);
    }
}
