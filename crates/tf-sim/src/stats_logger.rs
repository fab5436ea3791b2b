//! Periodic one-line status through `tracing`.

use std::time::Duration;

use tf_core::SimTime;
use tf_network::NetworkStats;
use tracing::info;

use crate::{SimObserver, SimReport, TickSummary};

/// Logs `queue current/peak | sent | spikes` every `interval` of clock time,
/// and the final counters at the end of the run.
pub struct StatsLogger {
    interval:   Duration,
    last_print: SimTime,
    lines:      u64,
}

impl StatsLogger {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last_print: SimTime::ZERO, lines: 0 }
    }

    /// Number of periodic lines emitted so far.
    pub fn lines(&self) -> u64 {
        self.lines
    }
}

impl SimObserver for StatsLogger {
    fn on_tick_end(&mut self, summary: &TickSummary, stats: &NetworkStats) {
        if self.interval.is_zero() || summary.now.saturating_since(self.last_print) < self.interval {
            return;
        }
        self.last_print = summary.now;
        self.lines += 1;
        info!(
            tick = summary.tick.0,
            queue = stats.current_queue_size,
            peak = stats.max_queue_size,
            sent = stats.packets_sent,
            spikes = stats.spikes_triggered,
            "{stats}"
        );
    }

    fn on_sim_end(&mut self, report: &SimReport) {
        let s = &report.stats;
        info!(
            ticks = report.ticks,
            queued = s.packets_queued,
            sent = s.packets_sent,
            failed = s.send_failures,
            spikes = s.spikes_triggered,
            peak = s.max_queue_size,
            blackouts = s.blackouts_started,
            blackout_drops = s.blackouts_dropped,
            overflow = s.overflow_dropped,
            discarded = report.drain.discarded,
            "final stats"
        );
    }
}
