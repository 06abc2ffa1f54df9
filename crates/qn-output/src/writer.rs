//! The `OutputWriter` trait implemented by output backends.

use crate::{CompletedRow, MetricsRow, OutputResult, RejectionRow};

/// Sink for the three record streams of a run.
///
/// When driven by [`OutputObserver`](crate::OutputObserver), errors are
/// stored and retrieved with
/// [`OutputObserver::take_error`](crate::OutputObserver::take_error).
pub trait OutputWriter {
    /// Write one completed service visit.
    fn write_completed(&mut self, row: &CompletedRow) -> OutputResult<()>;

    /// Write one rejection.
    fn write_rejection(&mut self, row: &RejectionRow) -> OutputResult<()>;

    /// Write a batch of metrics rows.
    fn write_metrics(&mut self, rows: &[MetricsRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
