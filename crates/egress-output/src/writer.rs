//! The `ReportWriter` trait implemented by backend writers.

use crate::row::{DoorSummaryRow, ExitLogRow};
use crate::OutputResult;

/// Trait implemented by report backends.
///
/// From the observer's perspective all methods are infallible — errors are
/// stored internally and retrieved with
/// [`ReportObserver::take_error`][crate::ReportObserver::take_error].
pub trait ReportWriter {
    /// Write the full ordered exit log.
    fn write_exit_log(&mut self, rows: &[ExitLogRow]) -> OutputResult<()>;

    /// Write the per-door summary.
    fn write_door_summary(&mut self, rows: &[DoorSummaryRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
