//! `qn-output` — output writers for qn simulation runs.
//!
//! | Backend | Files created                                                    |
//! |---------|------------------------------------------------------------------|
//! | CSV     | `completed_agents.csv`, `rejections.csv`, `station_metrics.csv`  |
//!
//! Backends implement [`OutputWriter`] and are driven either live by
//! [`OutputObserver`], which implements `qn_sim::SimObserver`, or after the
//! fact by [`write_run`].
//!
//! `station_metrics.csv` carries a `network` column so the tables of several
//! runs can be concatenated and told apart.
//!
//! # Usage
//!
//! ```rust,ignore
//! use qn_output::{CsvWriter, OutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"), config.horizon)?;
//! let mut obs = OutputObserver::new(writer, &config, "jackson-series");
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::{OutputObserver, write_run};
pub use row::{ALL_CLASSES, CompletedRow, MetricsRow, RejectionRow};
pub use writer::OutputWriter;
