//! CSV report backend.
//!
//! Creates two files in the configured output directory:
//! - `evacuation_log.csv`
//! - `door_summary.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::row::{DoorSummaryRow, ExitLogRow};
use crate::writer::ReportWriter;
use crate::OutputResult;

/// Writes the evacuation report to two CSV files.
pub struct CsvReportWriter {
    exits:    Writer<File>,
    doors:    Writer<File>,
    finished: bool,
}

impl CsvReportWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut exits = Writer::from_path(dir.join("evacuation_log.csv"))?;
        exits.write_record(["order", "agent_id", "door_id"])?;

        let mut doors = Writer::from_path(dir.join("door_summary.csv"))?;
        doors.write_record(["door_id", "x", "y", "exits"])?;

        Ok(Self {
            exits,
            doors,
            finished: false,
        })
    }
}

impl ReportWriter for CsvReportWriter {
    fn write_exit_log(&mut self, rows: &[ExitLogRow]) -> OutputResult<()> {
        for row in rows {
            self.exits.write_record(&[
                row.order.to_string(),
                row.agent_id.to_string(),
                row.door_id.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_door_summary(&mut self, rows: &[DoorSummaryRow]) -> OutputResult<()> {
        for row in rows {
            self.doors.write_record(&[
                row.door_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.exits.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.exits.flush()?;
        self.doors.flush()?;
        Ok(())
    }
}
