//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use tf_core::Tick;
use tf_network::{DeliveryRecord, NetworkStats};
use tf_sim::{SimObserver, SimReport, TickSummary};

use crate::row::{DeliveryRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that records every delivery and every tick summary to
/// an [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After `sim.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer.  `run` does this on its own; call it after
    /// `run_ticks`.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.writer.finish()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_deliveries(&mut self, _tick: Tick, records: &[DeliveryRecord]) {
        let rows: Vec<DeliveryRow> = records.iter().map(DeliveryRow::from).collect();
        let result = self.writer.write_deliveries(&rows);
        self.store_err(result);
    }

    fn on_tick_end(&mut self, summary: &TickSummary, _stats: &NetworkStats) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(summary));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _report: &SimReport) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
