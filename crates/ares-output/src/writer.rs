//! The `SnapshotWriter` trait implemented by output backends.

use crate::{CellRow, OutputResult, TickSummaryRow};

pub trait SnapshotWriter {
    /// Write the occupied cells of one frame.
    fn write_cells(&mut self, rows: &[CellRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close the underlying files.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Lets a borrowed writer be handed to a [`SnapshotRecorder`](crate::SnapshotRecorder).
impl<W: SnapshotWriter + ?Sized> SnapshotWriter for &mut W {
    fn write_cells(&mut self, rows: &[CellRow]) -> OutputResult<()> {
        (**self).write_cells(rows)
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        (**self).write_tick_summary(row)
    }

    fn finish(&mut self) -> OutputResult<()> {
        (**self).finish()
    }
}
