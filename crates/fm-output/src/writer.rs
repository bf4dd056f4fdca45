//! The `OutputWriter` trait implemented by backend writers.

use crate::{FleetSnapshotRow, OutputResult, TurnSummaryRow};

/// Sink for fleet snapshots and turn summaries.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`](crate::SimOutputObserver::take_error).
pub trait OutputWriter {
    /// Write a batch of fleet snapshots.
    fn write_snapshots(&mut self, rows: &[FleetSnapshotRow]) -> OutputResult<()>;

    /// Write one turn summary row.
    fn write_turn_summary(&mut self, row: &TurnSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
