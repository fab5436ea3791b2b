//! The `OutputWriter` trait implemented by recording backends.

use crate::{DeliveryRow, OutputResult, TickSummaryRow};

/// Sink for delivery records and per-tick summaries.
///
/// Errors are stored by [`SimOutputObserver`][crate::SimOutputObserver] and
/// retrieved with `take_error` after the run.
pub trait OutputWriter {
    /// Write a batch of delivered (or failed) packets.
    fn write_deliveries(&mut self, rows: &[DeliveryRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
