//! `tf-output` — recording what the emulator actually delivered.
//!
//! | Backend | Files created                              |
//! |---------|--------------------------------------------|
//! | CSV     | `deliveries.csv`, `tick_summaries.csv`     |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `tf_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tf_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./record"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{DeliveryRow, TickSummaryRow};
pub use writer::OutputWriter;
