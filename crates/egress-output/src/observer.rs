//! `ReportObserver<W>` — bridges `SimObserver` to a `ReportWriter`.

use egress_sim::{SimObserver, SimReport};

use crate::row::{DoorSummaryRow, ExitLogRow};
use crate::writer::ReportWriter;
use crate::OutputError;

/// A [`SimObserver`] that serializes the final report through any
/// [`ReportWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After `sim.run()` returns, check with
/// [`take_error`][Self::take_error].
pub struct ReportObserver<W: ReportWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: ReportWriter> ReportObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after the run.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: ReportWriter> SimObserver for ReportObserver<W> {
    fn on_sim_end(&mut self, report: &SimReport) {
        let exits: Vec<ExitLogRow> = report
            .log
            .iter()
            .enumerate()
            .map(|(i, record)| ExitLogRow {
                order:    i as u32,
                agent_id: record.agent.0,
                door_id:  record.door.0,
            })
            .collect();
        let result = self.writer.write_exit_log(&exits);
        self.store_err(result);

        let doors: Vec<DoorSummaryRow> = report
            .doors
            .iter()
            .map(|d| DoorSummaryRow {
                door_id: d.id.0,
                x:       d.cell.x,
                y:       d.cell.y,
                exits:   d.exits,
            })
            .collect();
        let result = self.writer.write_door_summary(&doors);
        self.store_err(result);

        let result = self.writer.finish();
        self.store_err(result);
    }
}
