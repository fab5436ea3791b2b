//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `deliveries.csv`
//! - `tick_summaries.csv`

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{DeliveryRow, OutputResult, TickSummaryRow};

/// Writes recordings to two CSV files.
pub struct CsvWriter {
    deliveries: Writer<File>,
    summaries:  Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the two CSV files, and write the header
    /// rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut deliveries = Writer::from_path(dir.join("deliveries.csv"))?;
        deliveries.write_record(["device", "captured_unix_ms", "scheduled_us", "flushed_us", "bytes", "ok"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "time_us", "generated", "dropped", "sent", "queue_size"])?;

        Ok(Self {
            deliveries,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_deliveries(&mut self, rows: &[DeliveryRow]) -> OutputResult<()> {
        for row in rows {
            self.deliveries.write_record(&[
                row.device.to_string(),
                row.captured_unix_ms.to_string(),
                row.scheduled_us.to_string(),
                row.flushed_us.to_string(),
                row.bytes.to_string(),
                (row.ok as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.time_us.to_string(),
            row.generated.to_string(),
            row.dropped.to_string(),
            row.sent.to_string(),
            row.queue_size.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.deliveries.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
