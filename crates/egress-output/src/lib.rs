//! `egress-output` — simulation report writers for the egress simulator.
//!
//! The CSV backend creates two files in the configured output directory:
//!
//! | File                 | Contents                                     |
//! |----------------------|----------------------------------------------|
//! | `evacuation_log.csv` | one row per exit, in global arrival order    |
//! | `door_summary.csv`   | one row per door with its final exit count   |
//!
//! The backend implements [`ReportWriter`] and is driven by
//! [`ReportObserver`], which implements `egress_sim::SimObserver` and writes
//! everything once, from the final report.
//!
//! # Usage
//!
//! ```rust,ignore
//! use egress_output::{CsvReportWriter, ReportObserver};
//!
//! let writer = CsvReportWriter::new(Path::new("./output"))?;
//! let mut obs = ReportObserver::new(writer);
//! sim.run(&mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use crate::csv::CsvReportWriter;
pub use error::{OutputError, OutputResult};
pub use observer::ReportObserver;
pub use row::{DoorSummaryRow, ExitLogRow};
pub use writer::ReportWriter;
